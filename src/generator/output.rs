use crate::models::TypeRef;

/// A class reference split into package and simple name. The default
/// package is the empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    pub package: String,
    pub simple_name: String,
}

impl ClassName {
    pub fn new<P: Into<String>, S: Into<String>>(package: P, simple_name: S) -> Self {
        Self { package: package.into(), simple_name: simple_name.into() }
    }

    /// Splits on the last `.`; a name without one is in the default package.
    pub fn from_qualified(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((package, simple)) => Self::new(package, simple),
            None => Self::new("", name),
        }
    }

    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }

    pub fn to_type_ref(&self) -> TypeRef {
        TypeRef::new(self.qualified())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Private,
}

impl Modifier {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: ClassName,
    pub modifier: Modifier,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `this.<field> = <param>`
    AssignField { field: String, param: String },
    /// `[return ]<target>.<method>(<args>)`
    Forward {
        returns: bool,
        target: String,
        method: String,
        args: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constructor {
    pub modifier: Modifier,
    pub parameters: Vec<Param>,
    pub body: Vec<Statement>,
}

impl Default for Constructor {
    fn default() -> Self {
        Self { modifier: Modifier::Public, parameters: Vec::new(), body: Vec::new() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForwardingMethod {
    pub name: String,
    pub modifier: Modifier,
    pub is_override: bool,
    pub return_type: TypeRef,
    pub parameters: Vec<Param>,
    pub body: Vec<Statement>,
}

/// The finished forwarding class, ready to be handed to a renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedClass {
    pub name: ClassName,
    pub implemented_interface: ClassName,
    pub doc: Option<String>,
    pub modifier: Modifier,
    pub fields: Vec<Field>,
    pub constructor: Constructor,
    pub methods: Vec<ForwardingMethod>,
}

#[derive(Clone, Debug)]
pub struct ClassBuilder {
    class: GeneratedClass,
}

impl ClassBuilder {
    pub fn new(name: ClassName, implemented_interface: ClassName) -> Self {
        Self {
            class: GeneratedClass {
                name,
                implemented_interface,
                doc: None,
                modifier: Modifier::Public,
                fields: Vec::new(),
                constructor: Constructor::default(),
                methods: Vec::new(),
            },
        }
    }

    pub fn doc<S: Into<String>>(mut self, doc: S) -> Self {
        self.class.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.class.fields.push(field);
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.class.constructor = constructor;
        self
    }

    pub fn method(mut self, method: ForwardingMethod) -> Self {
        self.class.methods.push(method);
        self
    }

    pub fn build(self) -> GeneratedClass {
        self.class
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConstructorBuilder {
    constructor: Constructor,
}

impl ConstructorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameter(&mut self, name: &str, ty: TypeRef) -> &mut Self {
        self.constructor.parameters.push(Param { name: name.to_string(), ty });
        self
    }

    pub fn statement(&mut self, statement: Statement) -> &mut Self {
        self.constructor.body.push(statement);
        self
    }

    pub fn build(self) -> Constructor {
        self.constructor
    }
}

#[derive(Clone, Debug)]
pub struct MethodBuilder {
    method: ForwardingMethod,
}

impl MethodBuilder {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            method: ForwardingMethod {
                name: name.into(),
                modifier: Modifier::Public,
                is_override: false,
                return_type: TypeRef::void(),
                parameters: Vec::new(),
                body: Vec::new(),
            },
        }
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.method.modifier = modifier;
        self
    }

    pub fn overrides(mut self) -> Self {
        self.method.is_override = true;
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.method.return_type = ty;
        self
    }

    pub fn parameter(mut self, name: &str, ty: TypeRef) -> Self {
        self.method.parameters.push(Param { name: name.to_string(), ty });
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.method.body.push(statement);
        self
    }

    pub fn build(self) -> ForwardingMethod {
        self.method
    }
}
