use super::*;

pub(crate) struct ParsedRecord {
    ident: Ident,
    name: String,
    generics: syn::Generics,
    fields: Vec<ParsedField>,
}

impl ParsedRecord {
    pub(crate) fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut name = input.ident.unraw().to_string();
        for attr in &input.attrs {
            if attr.path().is_ident("tagged") {
                Self::parse_container_attr(attr, &mut name)?;
            } else if attr.path().is_ident("tag") {
                return Err(Error::new(attr.span(), "#[tag(...)] belongs on fields, not on the record"));
            }
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Self::parse_fields(named.named.iter())?,
                Fields::Unnamed(unnamed) => Self::parse_fields(unnamed.unnamed.iter())?,
                Fields::Unit => Vec::new(),
            },
            _ => return Err(Error::new(input.ident.span(), "Tagged can only be derived for structs")),
        };

        Ok(Self {
            ident: input.ident.clone(),
            name,
            generics: input.generics.clone(),
            fields,
        })
    }

    fn parse_fields<'a>(fields: impl Iterator<Item = &'a Field>) -> Result<Vec<ParsedField>> {
        let mut parsed = Vec::new();
        for (index, field) in fields.enumerate() {
            let field = ParsedField::from_field(index, field)?;
            if !field.skip {
                parsed.push(field);
            }
        }
        Ok(parsed)
    }

    fn parse_container_attr(attr: &Attribute, name: &mut String) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() {
                    return Err(Error::new(value.span(), "record rename cannot be empty"));
                }
                *name = value.value();
                Ok(())
            } else {
                Err(meta.error("unknown tagged option on a record, expected `rename`"))
            }
        })
    }

    fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Generic records need `'static` parameters, and parameters reached by a
    /// non-opaque field must be `Shape`. Bounding parameters rather than field
    /// types keeps self-referencing records like `Tree<T>` resolvable.
    fn bounded_generics(&self) -> syn::Generics {
        let mut generics = self.generics.clone();
        if !self.is_generic() {
            return generics;
        }

        let params: Vec<GenericParam> = generics.params.iter().cloned().collect();
        let where_clause = generics.make_where_clause();
        for param in params {
            match param {
                GenericParam::Type(param) => {
                    let ident = param.ident;
                    let walked = self
                        .fields
                        .iter()
                        .filter(|field| !field.opaque)
                        .any(|field| mentions_ident(field.ty.to_token_stream(), &ident));
                    if walked {
                        where_clause
                            .predicates
                            .push(syn::parse_quote! { #ident: ::tago::Shape + 'static });
                    } else {
                        where_clause.predicates.push(syn::parse_quote! { #ident: 'static });
                    }
                }
                GenericParam::Lifetime(param) => {
                    let lifetime = param.lifetime;
                    where_clause.predicates.push(syn::parse_quote! { #lifetime: 'static });
                }
                GenericParam::Const(_) => {}
            }
        }
        generics
    }

    pub(crate) fn emit(&self) -> TokenStream2 {
        let ident = &self.ident;
        let name = LitStr::new(&self.name, Span::call_site());
        let field_inits = self.fields.iter().map(|field| field.to_descriptor_tokens());

        let generics = self.bounded_generics();
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // inventory needs a concrete type
        let registration = if self.is_generic() {
            quote! {}
        } else {
            quote! {
                ::tago::inventory::submit! {
                    ::tago::TaggedRegistration {
                        type_id: ::std::any::TypeId::of::<#ident>,
                        type_name: #name,
                        record_fn: <#ident as ::tago::Tagged>::record,
                    }
                }
            }
        };

        quote! {
            impl #impl_generics ::tago::Tagged for #ident #ty_generics #where_clause {
                fn record() -> ::tago::RecordDescriptor {
                    ::tago::RecordDescriptor::of::<Self>(
                        #name,
                        ::std::vec![#(#field_inits),*],
                    )
                }
            }

            impl #impl_generics ::tago::Shape for #ident #ty_generics #where_clause {
                fn shape() -> ::tago::TypeShape {
                    ::tago::TypeShape::Record(<Self as ::tago::Tagged>::record)
                }
            }

            #registration
        }
    }
}

fn mentions_ident(tokens: TokenStream2, ident: &Ident) -> bool {
    tokens.into_iter().any(|token| match token {
        TokenTree::Ident(found) => found == *ident,
        TokenTree::Group(group) => mentions_ident(group.stream(), ident),
        _ => false,
    })
}
