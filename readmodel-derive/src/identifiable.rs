use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DataStruct, DeriveInput, Fields, LitStr, Result};

const DEFAULT_ID_FIELD: &str = "id";

pub(crate) fn generate_identifiable_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let mut class_name = name.to_string();
    let mut id_field_name = DEFAULT_ID_FIELD.to_string();
    let mut class_found = false;
    let mut id_found = false;

    for attr in &ast.attrs {
        if attr.path().is_ident("read_model") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("class") {
                    if class_found {
                        return Err(meta.error("Multiple class attributes are not allowed"));
                    }
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    if s.value().is_empty() {
                        return Err(meta.error("Class cannot be empty"));
                    }
                    class_name = s.value();
                    class_found = true;
                    Ok(())
                } else if meta.path.is_ident("id") {
                    if id_found {
                        return Err(meta.error("Multiple id attributes are not allowed"));
                    }
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    id_field_name = s.value();
                    id_found = true;
                    Ok(())
                } else {
                    Err(meta.error("Unknown read_model attribute"))
                }
            })?
        }
    }

    let named = match &data.fields {
        Fields::Named(named) => named,
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                "Identifiable can only be derived for structs with named fields",
            ))
        }
    };

    let has_id_field = named.named.iter().any(|field| {
        field
            .ident
            .as_ref()
            .is_some_and(|ident| ident == id_field_name.as_str())
    });
    if !has_id_field {
        return Err(syn::Error::new_spanned(
            ast,
            format!(
                "Field {} not found in struct, name the identifier with #[read_model(id = \"...\")]",
                id_field_name
            ),
        ));
    }

    let id_ident = format_ident!("{}", id_field_name);
    let expanded = quote! {
        impl #impl_generics readmodel::repository::Identifiable for #name #ty_generics #where_clause {
            fn model_class() -> String {
                #class_name.to_string()
            }

            fn id(&self) -> String {
                ::std::string::ToString::to_string(&self.#id_ident)
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
