use super::*;

pub(crate) struct ParsedField {
    pub(crate) name: String,
    pub(crate) ty: Type,
    /// `(namespace, raw)` in declaration order.
    pub(crate) tags: Vec<(String, LitStr)>,
    pub(crate) opaque: bool,
    pub(crate) skip: bool,
}

impl ParsedField {
    pub(crate) fn from_field(index: usize, field: &Field) -> Result<Self> {
        let mut name = match &field.ident {
            Some(ident) => ident.unraw().to_string(),
            None => index.to_string(),
        };
        let mut tags: Vec<(String, LitStr)> = Vec::new();
        let mut opaque = false;
        let mut skip = false;

        for attr in &field.attrs {
            if attr.path().is_ident("tag") {
                Self::parse_tag_attr(attr, &mut tags)?;
            } else if attr.path().is_ident("tagged") {
                Self::parse_tagged_attr(attr, &mut name, &mut opaque, &mut skip)?;
            }
        }

        if skip && (opaque || !tags.is_empty()) {
            return Err(Error::new(
                field.span(),
                "#[tagged(skip)] fields cannot carry tags or other tagged options",
            ));
        }

        Ok(Self {
            name,
            ty: field.ty.clone(),
            tags,
            opaque,
            skip,
        })
    }

    /// `#[tag(gorm2 = "preload=true", validate = "required")]`
    fn parse_tag_attr(attr: &Attribute, tags: &mut Vec<(String, LitStr)>) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            let namespace = meta
                .path
                .get_ident()
                .map(|ident| ident.unraw().to_string())
                .ok_or_else(|| meta.error("tag namespace must be a single identifier"))?;
            if tags.iter().any(|(existing, _)| *existing == namespace) {
                return Err(meta.error(format!("duplicate `{}` tag on this field", namespace)));
            }
            let raw: LitStr = meta
                .value()
                .map_err(|_| meta.error(format!("expected `{} = \"...\"`", namespace)))?
                .parse()?;
            tags.push((namespace, raw));
            Ok(())
        })
    }

    fn parse_tagged_attr(attr: &Attribute, name: &mut String, opaque: &mut bool, skip: &mut bool) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(Error::new(value.span(), "field rename cannot be empty"));
                }
                *name = value.value();
            } else if meta.path.is_ident("opaque") {
                *opaque = true;
            } else if meta.path.is_ident("skip") {
                *skip = true;
            } else {
                return Err(meta.error("unknown tagged option, expected `rename`, `opaque` or `skip`"));
            }
            Ok(())
        })
    }

    pub(crate) fn to_descriptor_tokens(&self) -> TokenStream2 {
        let name = LitStr::new(&self.name, Span::call_site());
        let ty = &self.ty;
        let type_name = LitStr::new(&type_display(ty), Span::call_site());
        let shape = if self.opaque {
            quote! { ::tago::shape::opaque::<#ty> }
        } else {
            quote! { <#ty as ::tago::Shape>::shape }
        };
        let tags = self.tags.iter().map(|(namespace, raw)| {
            let namespace = LitStr::new(namespace, raw.span());
            quote! { (#namespace, #raw) }
        });

        quote! {
            ::tago::FieldDescriptor {
                name: #name,
                type_name: #type_name,
                shape: #shape,
                tags: &[#(#tags),*],
            }
        }
    }
}

/// Render a type the way it is usually written, e.g. `Vec<Box<Node>>`.
pub(crate) fn type_display(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace(" ;", ";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn first_field(input: DeriveInput) -> Result<ParsedField> {
        match input.data {
            Data::Struct(data) => {
                let field = data.fields.iter().next().expect("one field");
                ParsedField::from_field(0, field)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn collects_tags_per_namespace() {
        let field = first_field(parse_quote! {
            struct Model {
                #[tag(gorm2 = "preload=true", validate = "required")]
                #[tag(mask = "")]
                author: Author,
            }
        })
        .unwrap();

        let tags: Vec<(String, String)> = field.tags.iter().map(|(ns, raw)| (ns.clone(), raw.value())).collect();
        assert_eq!(
            tags,
            vec![
                ("gorm2".to_string(), "preload=true".to_string()),
                ("validate".to_string(), "required".to_string()),
                ("mask".to_string(), String::new()),
            ]
        );
        assert_eq!(field.name, "author");
    }

    #[test]
    fn raw_identifiers_and_renames() {
        let field = first_field(parse_quote! {
            struct Model { r#type: String }
        })
        .unwrap();
        assert_eq!(field.name, "type");

        let field = first_field(parse_quote! {
            struct Model { #[tagged(rename = "Type")] r#type: String }
        })
        .unwrap();
        assert_eq!(field.name, "Type");
    }

    #[test]
    fn tuple_fields_use_their_position() {
        let field = first_field(parse_quote! {
            struct Wrapper(#[tag(mask = "full")] String);
        })
        .unwrap();
        assert_eq!(field.name, "0");
    }

    #[test]
    fn duplicate_namespace_is_rejected() {
        let err = first_field(parse_quote! {
            struct Model {
                #[tag(gorm2 = "a")]
                #[tag(gorm2 = "b")]
                author: Author,
            }
        })
        .err()
        .expect("duplicate namespace");
        assert!(err.to_string().contains("duplicate `gorm2` tag"));
    }

    #[test]
    fn namespace_requires_a_value() {
        let err = first_field(parse_quote! {
            struct Model { #[tag(gorm2)] author: Author }
        })
        .err()
        .expect("missing value");
        assert!(err.to_string().contains("expected `gorm2 = \"...\"`"));
    }

    #[test]
    fn unknown_tagged_option_is_rejected() {
        let err = first_field(parse_quote! {
            struct Model { #[tagged(flatten)] author: Author }
        })
        .err()
        .expect("unknown option");
        assert!(err.to_string().contains("unknown tagged option"));
    }

    #[test]
    fn skip_cannot_be_combined_with_tags() {
        let result = first_field(parse_quote! {
            struct Model {
                #[tagged(skip)]
                #[tag(gorm2 = "preload")]
                author: Author,
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn displays_types_compactly() {
        let ty: Type = parse_quote!(Option<Box<crate::models::Node>>);
        assert_eq!(type_display(&ty), "Option<Box<crate::models::Node>>");
        let ty: Type = parse_quote!(Vec<&'static str>);
        assert_eq!(type_display(&ty), "Vec<&'static str>");
        let ty: Type = parse_quote!([u8; 4]);
        assert_eq!(type_display(&ty), "[u8; 4]");
    }

    #[test]
    fn opaque_fields_skip_the_shape_bound() {
        let field = first_field(parse_quote! {
            struct Model { #[tagged(opaque)] at: chrono::DateTime<chrono::Utc> }
        })
        .unwrap();
        let tokens = field.to_descriptor_tokens().to_string();
        assert!(tokens.contains("opaque"));
        assert!(!tokens.contains(":: Shape"));
    }
}
