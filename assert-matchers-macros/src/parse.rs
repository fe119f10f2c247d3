use syn::{Data, DeriveInput, Result, spanned::Spanned};

/// The item a `Compare` impl is generated for.
pub(crate) struct Container {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub shape: Shape,
}

pub(crate) enum Shape {
    Struct(Fields),
    Enum(Vec<Variant>),
}

pub(crate) struct Variant {
    pub ident: syn::Ident,
    pub fields: Fields,
}

pub(crate) struct Fields {
    pub unit: bool,
    pub fields: Vec<FieldSpec>,
}

/// One field together with its `#[compare(..)]` flags.
pub(crate) struct FieldSpec {
    pub member: syn::Member,
    /// Name used in comparison paths: the identifier, or the index for tuple
    /// fields.
    pub name: String,
    pub internal: bool,
    pub skip: bool,
}

impl Container {
    /// Reads a derive input.
    ///
    /// # Example Input
    /// ```text
    /// struct Message {
    ///     id: u64,
    ///     #[compare(internal)]
    ///     size_cache: u32,
    /// }
    /// ```
    pub(crate) fn from_derive(input: &DeriveInput) -> Result<Self> {
        if let Some(lifetime) = input.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "Compare cannot be derived for types with lifetime parameters",
            ));
        }

        let shape = match &input.data {
            Data::Struct(data) => Shape::Struct(Fields::parse(&data.fields)?),
            Data::Enum(data) => Shape::Enum(
                data.variants
                    .iter()
                    .map(|variant| {
                        Ok(Variant {
                            ident: variant.ident.clone(),
                            fields: Fields::parse(&variant.fields)?,
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "Compare cannot be derived for unions",
                ));
            }
        };

        Ok(Container {
            ident: input.ident.clone(),
            generics: input.generics.clone(),
            shape,
        })
    }
}

impl Fields {
    fn parse(fields: &syn::Fields) -> Result<Self> {
        let specs = fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let (member, name) = match &field.ident {
                    Some(ident) => (syn::Member::Named(ident.clone()), ident.to_string()),
                    None => (
                        syn::Member::Unnamed(syn::Index {
                            index: index as u32,
                            span: field.span(),
                        }),
                        index.to_string(),
                    ),
                };
                let (internal, skip) = parse_field_attrs(&field.attrs)?;

                Ok(FieldSpec {
                    member,
                    name,
                    internal,
                    skip,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Fields {
            unit: matches!(fields, syn::Fields::Unit),
            fields: specs,
        })
    }
}

/// Parses `#[compare(internal)]` and `#[compare(skip)]`, in any combination.
fn parse_field_attrs(attrs: &[syn::Attribute]) -> Result<(bool, bool)> {
    let mut internal = false;
    let mut skip = false;

    for attr in attrs {
        if !attr.path().is_ident("compare") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("internal") {
                internal = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported compare attribute, expected `internal` or `skip`"))
            }
        })?;
    }

    Ok((internal, skip))
}
