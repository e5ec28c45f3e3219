use convert_case::{Case, Casing};
use log::debug;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use crate::generator::{ClassName, ForwardingMethod, GeneratedClass, Param, Statement};
use crate::models::TypeRef;
use crate::render::known_types::KnownType;

/// Render a generated class as a struct holding the delegate plus an
/// implementation of the interface's trait that forwards to it.
pub fn render(class: &GeneratedClass) -> TokenStream {
    let struct_ident = ident(&class.name.simple_name);
    let trait_path = class_path(&class.implemented_interface);

    let fields = class.fields.iter()
        .map(|f| {
            let name = ident(&rust_name(&f.name));
            let ty = class_path(&f.ty);
            quote!(#name: #ty)
        })
        .collect::<Vec<_>>();

    let params = class.constructor.parameters.iter()
        .map(param_to_tokens)
        .collect::<Vec<_>>();

    let inits = class.constructor.body.iter()
        .filter_map(|s| match s {
            Statement::AssignField { field, param } => {
                let field = ident(&rust_name(field));
                let param = ident(&rust_name(param));
                Some(quote!(#field: #param))
            }
            Statement::Forward { .. } => None,
        })
        .collect::<Vec<_>>();

    // Rust has no overloading, so repeated names get a numeric suffix
    let method_names = unique_names(class.methods.iter().map(|m| m.name.as_str()));
    let methods = class.methods.iter()
        .zip(&method_names)
        .map(|(method, name)| {
            if rust_name(&method.name) != *name {
                debug!("Renamed overload {} to {}", method.name, name);
            }
            gen_method(method, name, &trait_path)
        })
        .collect::<Vec<_>>();

    quote! {
        pub struct #struct_ident {
            #(#fields),*
        }

        impl #struct_ident {
            pub fn new(#(#params),*) -> Self {
                Self {
                    #(#inits),*
                }
            }
        }

        impl #trait_path for #struct_ident {
            #(#methods)*
        }
    }
}

fn gen_method(method: &ForwardingMethod, name: &str, trait_path: &TokenStream) -> TokenStream {
    let method_ident = ident(name);

    // Snake-casing can merge distinct Java names such as `userId` and `user_id`
    let param_names = unique_names(method.parameters.iter().map(|p| p.name.as_str()));
    let params = method.parameters.iter()
        .zip(&param_names)
        .map(|(param, name)| {
            let name = ident(name);
            let ty = type_to_tokens(&param.ty);
            quote!(#name: #ty)
        })
        .collect::<Vec<_>>();

    let ret = if method.return_type.is_void() {
        quote!()
    } else {
        let ty = type_to_tokens(&method.return_type);
        quote!(-> #ty)
    };

    let body = method.body.iter()
        .map(|s| match s {
            Statement::Forward { returns, target, args, .. } => {
                let target = ident(&rust_name(target));
                let args = args.iter()
                    .map(|a| match method.parameters.iter().position(|p| &p.name == a) {
                        Some(index) => ident(&param_names[index]),
                        None => ident(&rust_name(a)),
                    })
                    .collect::<Vec<_>>();
                let call = quote!(#trait_path::#method_ident(&self.#target, #(#args),*));
                if *returns {
                    call
                } else {
                    quote!(#call;)
                }
            }
            Statement::AssignField { field, param } => {
                let field = ident(&rust_name(field));
                let param = ident(&rust_name(param));
                quote!(self.#field = #param;)
            }
        })
        .collect::<Vec<_>>();

    quote! {
        fn #method_ident(&self, #(#params),*) #ret {
            #(#body)*
        }
    }
}

fn param_to_tokens(param: &Param) -> TokenStream {
    let name = ident(&rust_name(&param.name));
    let ty = type_to_tokens(&param.ty);
    quote!(#name: #ty)
}

pub fn type_to_tokens(ty: &TypeRef) -> TokenStream {
    let base = match KnownType::from_str(&ty.class) {
        Some(known) => known.to_tokens(),
        None => class_path(&ClassName::from_qualified(&ty.class)),
    };

    if ty.is_array {
        quote!(std::vec::Vec<#base>)
    } else {
        base
    }
}

/// `com.example.Greeter` becomes `crate::crate::com::example::Greeter`. Packages
/// map onto the module tree written under the crate's `src`.
pub fn class_path(class: &ClassName) -> TokenStream {
    let segments = class.package.split('.')
        .filter(|s| !s.is_empty())
        .chain(std::iter::once(class.simple_name.as_str()))
        .map(ident)
        .collect::<Vec<_>>();

    quote!(crate::#(#segments)::*)
}

fn rust_name(name: &str) -> String {
    safe_name(&name.to_case(Case::Snake))
}

/// Snake-cased names with a numeric suffix on every repeat.
fn unique_names<'a, I: Iterator<Item = &'a str>>(names: I) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let base = rust_name(name);
        let mut candidate = base.clone();
        let mut index = 0;
        while unique.contains(&candidate) {
            candidate = format!("{}_{}", base, index);
            index += 1;
        }
        unique.push(candidate);
    }
    unique
}

/// `$` is not allowed in Rust identifiers, and path keywords cannot be raw
/// identifiers, so they get a trailing `_`.
pub fn safe_name(name: &str) -> String {
    let name = name.replace('$', "_");
    match name.as_str() {
        "self" | "Self" | "super" | "crate" => format!("{}_", name),
        _ => name,
    }
}

/// Other keywords such as `impl` are common package segments and become
/// raw identifiers.
pub(crate) fn ident(name: &str) -> Ident {
    let name = safe_name(name);
    match syn::parse_str::<Ident>(&name) {
        Ok(ident) => ident,
        Err(_) => Ident::new_raw(&name, Span::call_site()),
    }
}
