use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Input {
    pub interfaces: Vec<Target>,
}

/// One interface to generate a forwarding class for, together with the
/// delegate it forwards to.
#[derive(Deserialize, Clone, Debug)]
pub struct Target {
    #[serde(flatten)]
    pub interface: Interface,
    pub delegate: DelegateBinding,
    #[serde(rename(deserialize = "outputClassName"), default)]
    pub output_class_name: Option<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Interface {
    #[serde(rename(deserialize = "qualifiedName"))]
    pub qualified_name: String,
    #[serde(rename(deserialize = "simpleName"))]
    pub simple_name: String,
    pub members: Vec<Member>,
}

impl Interface {
    /// The callable members, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }
}

/// Anything enclosed by an interface declaration. Only methods take part
/// in generation.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Member {
    Method(Method),
    Field { name: String },
    Type { name: String },
    Initializer,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Method {
    pub name: String,
    #[serde(rename(deserialize = "returnType"))]
    pub return_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    #[serde(flatten)]
    pub ty: TypeRef,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    #[serde(rename(deserialize = "type"))]
    pub class: String,
    #[serde(rename(deserialize = "isArray"), default)]
    pub is_array: bool,
}

const PRIMITIVES: [&str; 8] = [
    "boolean", "byte", "char", "short", "int", "long", "float", "double",
];

impl TypeRef {
    pub fn new<S: Into<String>>(class: S) -> Self {
        Self { class: class.into(), is_array: false }
    }

    pub fn array<S: Into<String>>(class: S) -> Self {
        Self { class: class.into(), is_array: true }
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn is_void(&self) -> bool {
        self.class == "void" && !self.is_array
    }

    /// Primitives and `void` have no package and are never imported.
    pub fn is_builtin(&self) -> bool {
        self.class == "void" || PRIMITIVES.contains(&self.class.as_str())
    }
}

/// The object every call is forwarded to. Field names follow the
/// `@Delegate` annotation the descriptors are usually read from.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DelegateBinding {
    #[serde(rename(deserialize = "delegatePackage"))]
    pub package: String,
    #[serde(rename(deserialize = "delegateClassName"))]
    pub class_name: String,
    #[serde(rename(deserialize = "delegateSimpleName"))]
    pub field_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "interfaces": [{
            "qualifiedName": "com.example.Greeter",
            "simpleName": "Greeter",
            "members": [
                { "kind": "field", "name": "DEFAULT_NAME" },
                {
                    "kind": "method",
                    "name": "greet",
                    "returnType": { "type": "java.lang.String" },
                    "parameters": [
                        { "name": "who", "type": "java.lang.String" },
                        { "name": "times", "type": "int" }
                    ]
                },
                { "kind": "type", "name": "Builder" },
                { "kind": "initializer" },
                {
                    "kind": "method",
                    "name": "reset",
                    "returnType": { "type": "void" }
                }
            ],
            "delegate": {
                "delegatePackage": "com.example.impl",
                "delegateClassName": "DefaultGreeter",
                "delegateSimpleName": "greeter"
            }
        }]
    }"#;

    #[test]
    fn test_deserialize_input() {
        let input: Input = serde_json::from_str(INPUT).unwrap();
        assert_eq!(input.interfaces.len(), 1);

        let target = &input.interfaces[0];
        assert_eq!(target.interface.qualified_name, "com.example.Greeter");
        assert_eq!(target.interface.members.len(), 5);
        assert_eq!(target.output_class_name, None);
        assert_eq!(target.delegate, DelegateBinding {
            package: "com.example.impl".to_string(),
            class_name: "DefaultGreeter".to_string(),
            field_name: "greeter".to_string(),
        });
    }

    #[test]
    fn test_methods_skip_other_members() {
        let input: Input = serde_json::from_str(INPUT).unwrap();
        let methods = input.interfaces[0].interface.methods().collect::<Vec<_>>();

        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name, "greet");
        assert_eq!(methods[0].parameters[1], Parameter { name: "times".to_string(), ty: TypeRef::new("int") });
        assert_eq!(methods[1].name, "reset");
        assert!(methods[1].return_type.is_void());
        assert!(methods[1].parameters.is_empty());
    }

    #[test]
    fn test_array_flag() {
        let ty: TypeRef = serde_json::from_str(r#"{ "type": "byte", "isArray": true }"#).unwrap();
        assert_eq!(ty, TypeRef::array("byte"));
        assert!(ty.is_builtin());
        assert!(!TypeRef::array("void").is_void());
    }
}
