//! Record auto-registration via inventory crate.
//!
//! Every non-generic `#[derive(Tagged)]` record submits a [`TaggedRegistration`],
//! so code that only knows a record by name (from configuration, say) can
//! still extract its instruction index.

use std::any::TypeId;

use crate::record::RecordDescriptor;

/// Metadata for an auto-discovered record.
pub struct TaggedRegistration {
    /// The TypeId of the record struct
    pub type_id: fn() -> TypeId,
    /// The record name (struct name unless renamed with `#[tagged(rename = "...")]`)
    pub type_name: &'static str,
    /// Function building the record's field table
    pub record_fn: fn() -> RecordDescriptor,
}

inventory::collect!(TaggedRegistration);

/// Iterate all registered records, in no particular order.
pub fn registered_records() -> impl Iterator<Item = &'static TaggedRegistration> {
    inventory::iter::<TaggedRegistration>()
}

/// Get a registered record by name.
pub fn get_record_by_name(type_name: &str) -> Option<&'static TaggedRegistration> {
    registered_records().find(|r| r.type_name == type_name)
}

/// Check if a record type is registered.
pub fn is_record_registered<T: 'static>() -> bool {
    let type_id = TypeId::of::<T>();
    registered_records().any(|r| (r.type_id)() == type_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tagged;

    #[derive(Tagged)]
    #[allow(dead_code)]
    struct RegisteredProbe {
        #[tag(probe = "seen")]
        value: u8,
    }

    #[derive(Tagged)]
    #[tagged(rename = "renamed_probe")]
    #[allow(dead_code)]
    struct RenamedProbe {
        value: u8,
    }

    #[test]
    fn derived_records_are_registered() {
        assert!(is_record_registered::<RegisteredProbe>());
        let registration = get_record_by_name("RegisteredProbe").expect("probe registered");
        let record = (registration.record_fn)();
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields[0].tag("probe"), "seen");
    }

    #[test]
    fn renamed_records_register_under_their_new_name() {
        assert!(get_record_by_name("renamed_probe").is_some());
        assert!(get_record_by_name("RenamedProbe").is_none());
    }

    #[test]
    fn unknown_types_are_not_registered() {
        assert!(!is_record_registered::<String>());
        assert!(get_record_by_name("NoSuchRecord").is_none());
    }
}
