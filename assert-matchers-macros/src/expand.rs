use crate::parse::{Container, FieldSpec, Fields, Shape, Variant};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse_quote;

pub(crate) fn expand(container: &Container) -> TokenStream {
    let ident = &container.ident;

    let mut generics = container.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::assert_matchers::Compare));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &container.shape {
        Shape::Struct(fields) => expand_struct(fields),
        Shape::Enum(variants) => expand_enum(variants),
    };

    quote! {
        #[automatically_derived]
        impl #impl_generics ::assert_matchers::Compare for #ident #ty_generics #where_clause {
            #[allow(unreachable_patterns)]
            fn compare(
                &self,
                other: &Self,
                cmp: &mut ::assert_matchers::compare::Comparison<'_>,
            ) {
                #body
            }
        }
    }
}

/// `Field::new("name")` or `Field::internal("name")`.
fn field_descriptor(field: &FieldSpec) -> TokenStream {
    let name = &field.name;
    if field.internal {
        quote! { ::assert_matchers::compare::Field::internal(#name) }
    } else {
        quote! { ::assert_matchers::compare::Field::new(#name) }
    }
}

fn expand_struct(fields: &Fields) -> TokenStream {
    let visits: Vec<TokenStream> = fields
        .fields
        .iter()
        .filter(|field| !field.skip)
        .map(|field| {
            let member = &field.member;
            let descriptor = field_descriptor(field);
            quote! {
                cmp.field(#descriptor, &self.#member, &other.#member);
            }
        })
        .collect();

    if visits.is_empty() {
        return quote! {
            let _ = (other, cmp);
        };
    }

    quote! { #(#visits)* }
}

fn expand_enum(variants: &[Variant]) -> TokenStream {
    if variants.is_empty() {
        return quote! {
            let _ = (other, cmp);
            match *self {}
        };
    }

    let arms: Vec<TokenStream> = variants.iter().map(expand_variant_arm).collect();

    // Single-variant enums make the fallback arm unreachable.
    quote! {
        match (self, other) {
            #(#arms)*
            _ => cmp.variant_mismatch(self, other),
        }
    }
}

/// Generates `(Self::V { a: __actual_0, .. }, Self::V { a: __expected_0, .. }) => { .. }`.
///
/// Tuple variants use the same braced form with index members (`{ 0: x }`).
fn expand_variant_arm(variant: &Variant) -> TokenStream {
    let ident = &variant.ident;

    if variant.fields.unit {
        return quote! {
            (Self::#ident, Self::#ident) => {}
        };
    }

    let mut actual_bindings = Vec::new();
    let mut expected_bindings = Vec::new();
    let mut visits = Vec::new();

    for (index, field) in variant.fields.fields.iter().enumerate() {
        let member = &field.member;
        if field.skip {
            actual_bindings.push(quote! { #member: _ });
            expected_bindings.push(quote! { #member: _ });
            continue;
        }

        let actual = format_ident!("__actual_{}", index);
        let expected = format_ident!("__expected_{}", index);
        let descriptor = field_descriptor(field);

        actual_bindings.push(quote! { #member: #actual });
        expected_bindings.push(quote! { #member: #expected });
        visits.push(quote! {
            cmp.field(#descriptor, #actual, #expected);
        });
    }

    quote! {
        (
            Self::#ident { #(#actual_bindings),* },
            Self::#ident { #(#expected_bindings),* },
        ) => {
            #(#visits)*
        }
    }
}
