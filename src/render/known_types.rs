use proc_macro2::TokenStream;
use quote::quote;

/// Java types with a direct Rust counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownType {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    U16,
    String,
}

impl KnownType {
    pub fn from_str<S: AsRef<str>>(s: S) -> Option<Self> {
        match s.as_ref() {
            "void" | "java.lang.Void" => Some(Self::Unit),
            "boolean" | "java.lang.Boolean" => Some(Self::Bool),
            "byte" | "java.lang.Byte" => Some(Self::I8),
            "short" | "java.lang.Short" => Some(Self::I16),
            "int" | "java.lang.Integer" => Some(Self::I32),
            "long" | "java.lang.Long" => Some(Self::I64),
            "float" | "java.lang.Float" => Some(Self::F32),
            "double" | "java.lang.Double" => Some(Self::F64),
            "char" | "java.lang.Character" => Some(Self::U16),
            "java.lang.String" | "java.lang.CharSequence" => Some(Self::String),
            _ => None
        }
    }

    pub fn to_tokens(&self) -> TokenStream {
        match self {
            Self::Unit => quote!(()),
            Self::Bool => quote!(bool),
            Self::I8 => quote!(i8),
            Self::I16 => quote!(i16),
            Self::I32 => quote!(i32),
            Self::I64 => quote!(i64),
            Self::F32 => quote!(f32),
            Self::F64 => quote!(f64),
            Self::U16 => quote!(u16),
            Self::String => quote!(String),
        }
    }
}
