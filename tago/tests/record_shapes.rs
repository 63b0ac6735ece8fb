use tago::{
    FieldDescriptor, Instruction, RecordDescriptor, Shape, Tagged, Tago, TagoError, TypeShape, element_shape_of,
};

#[derive(Tagged)]
#[allow(dead_code)]
struct Page<T> {
    #[tag(api = "paginate")]
    items: Vec<T>,
    #[tag(api = "cursor")]
    next: Option<String>,
}

#[derive(Tagged)]
#[allow(dead_code)]
struct Tree<T> {
    #[tag(orm = "index")]
    value: T,
    #[tag(orm = "preload")]
    children: Vec<Tree<T>>,
}

#[derive(Tagged)]
#[allow(dead_code)]
struct Product {
    #[tag(api = "filter=eq")]
    sku: String,
}

#[derive(Tagged)]
#[allow(dead_code)]
struct Email(#[tag(mask = "partial")] String);

#[derive(Tagged)]
#[allow(dead_code)]
struct Contact {
    #[tag(mask = "full")]
    primary: Email,
    #[tag(mask = "none")]
    others: [Email; 2],
}

#[derive(Tagged)]
#[tagged(rename = "audit_event")]
#[allow(dead_code)]
struct AuditEvent {
    #[tagged(rename = "Kind")]
    #[tag(log = "level=info")]
    kind: String,
    #[tag(log = "redact")]
    r#ref: String,
}

#[derive(Tagged)]
struct Marker;

/// Record wired up by hand, without the derive.
#[allow(dead_code)]
struct Legacy {
    code: String,
    product: Product,
}

impl Tagged for Legacy {
    fn record() -> RecordDescriptor {
        RecordDescriptor::of::<Self>(
            "Legacy",
            vec![
                FieldDescriptor {
                    name: "CODE",
                    type_name: "String",
                    shape: <String as Shape>::shape,
                    tags: &[("api", "filter=prefix")],
                },
                FieldDescriptor {
                    name: "PRODUCT",
                    type_name: "Product",
                    shape: <Product as Shape>::shape,
                    tags: &[("api", "embed")],
                },
            ],
        )
    }
}

impl Shape for Legacy {
    fn shape() -> TypeShape {
        TypeShape::Record(<Self as Tagged>::record)
    }
}

fn fields(index: &tago::InstructionIndex, instruction: &str) -> Vec<String> {
    index
        .fields(&Instruction::from(instruction))
        .iter()
        .map(|field| field.to_string())
        .collect()
}

#[test]
fn generic_records_walk_their_parameters() {
    let index = Tago::new("api").get_nested::<Page<Product>>();
    assert_eq!(fields(&index, "paginate"), ["items"]);
    assert_eq!(fields(&index, "cursor"), ["next"]);
    assert_eq!(fields(&index, "filter=eq"), ["items.sku"]);

    let scalars = Tago::new("api").get_nested::<Page<u32>>();
    assert_eq!(scalars.len(), 2);
}

#[test]
fn generic_self_referencing_records_terminate() {
    let tago = Tago::new("orm");
    let index = tago.get_nested::<Tree<u8>>();
    assert_eq!(fields(&index, "index"), ["value"]);
    assert_eq!(fields(&index, "preload"), ["children"]);
    assert!(tago.has::<Tree<u8>>(&Instruction::from("preload")));

    let products = Tago::new("api").get_nested::<Tree<Product>>();
    assert_eq!(fields(&products, "filter=eq"), ["value.sku"]);
}

#[test]
fn generic_records_are_distinct_types() {
    assert!(!tago::is_record_registered::<Page<Product>>());
    let a = Page::<Product>::record();
    let b = Page::<u32>::record();
    assert_ne!(a.type_id, b.type_id);
}

#[test]
fn tuple_fields_are_named_by_position() {
    let index = Tago::new("mask").get_nested::<Contact>();
    assert_eq!(fields(&index, "full"), ["primary"]);
    assert_eq!(fields(&index, "none"), ["others"]);
    assert_eq!(fields(&index, "partial"), ["primary.0", "others.0"]);
}

#[test]
fn renames_apply_to_fields_and_records() {
    let record = AuditEvent::record();
    assert_eq!(record.name, "audit_event");

    let index = Tago::new("log").get::<AuditEvent>();
    assert_eq!(fields(&index, "level=info"), ["Kind"]);
    assert_eq!(fields(&index, "redact"), ["ref"]);

    assert!(Tago::new("log").get_by_name("audit_event").is_ok());
}

#[test]
fn unit_records_have_empty_indexes() {
    assert!(Marker::record().fields.is_empty());
    assert!(Tago::new("api").get_nested::<Marker>().is_empty());
}

#[test]
fn hand_written_records_nest_like_derived_ones() {
    assert!(element_shape_of::<Vec<Legacy>>().is_record());

    let index = Tago::new("api").get_nested::<Legacy>();
    assert_eq!(fields(&index, "filter=prefix"), ["CODE"]);
    assert_eq!(fields(&index, "embed"), ["PRODUCT"]);
    assert_eq!(fields(&index, "filter=eq"), ["PRODUCT.sku"]);
    assert!(!tago::is_record_registered::<Legacy>());
}

#[test]
fn scalars_are_not_records() {
    let tago = Tago::new("api");
    assert!(matches!(tago.try_get::<Option<String>>(), Err(TagoError::NotARecord { .. })));
    assert!(tago.get_nested::<Vec<u8>>().is_empty());
}
