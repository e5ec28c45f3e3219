use std::fs;
use std::path::Path;
use anyhow::Result;
use proc_macro2::TokenStream;
use quote::quote;
use crate::render::rust::ident;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Entry {
    pub name: String,
    pub file: bool,
}

/// A `mod.rs` body declaring every entry. Files are flattened into the
/// parent module, directories stay nested.
pub fn gen_mod(entries: &[Entry]) -> TokenStream {
    let mod_tokens = entries.iter()
        .map(gen_entry)
        .collect::<Vec<_>>();

    quote! {
        #(#mod_tokens)*
    }
}

fn gen_entry(entry: &Entry) -> TokenStream {
    let ident = ident(&entry.name);
    if entry.file {
        quote! {
            mod #ident;
            pub use #ident::*;
        }
    } else {
        quote! {
            pub mod #ident;
        }
    }
}

/// Rust sources and subdirectories of `path`, sorted, excluding the
/// module roots `mod.rs` and `lib.rs`.
pub fn get_submods(path: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for f in fs::read_dir(path)? {
        let f = f?;
        let file_name = f.file_name().to_string_lossy().to_string();

        if f.file_type()?.is_dir() {
            entries.push(Entry { name: file_name, file: false });
        } else if let Some(name) = file_name.strip_suffix(".rs") {
            if name != "mod" && name != "lib" {
                entries.push(Entry { name: name.to_string(), file: true });
            }
        }
    }

    entries.sort();
    Ok(entries)
}
