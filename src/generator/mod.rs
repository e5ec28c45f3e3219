use log::debug;
use crate::models::{DelegateBinding, Interface};

pub mod output;

pub use output::{
    ClassBuilder, ClassName, Constructor, ConstructorBuilder, Field, ForwardingMethod,
    GeneratedClass, MethodBuilder, Modifier, Param, Statement,
};

pub const CLASS_DESC: &str =
    "Forwards every call to the injected delegate.\nGenerated by delegen, do not edit.";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("qualified name '{qualified_name}' does not end with simple name '{simple_name}'")]
    MalformedName {
        qualified_name: String,
        simple_name: String,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Split `com.example.Greeter` into `com.example` and `Greeter`.
/// A qualified name equal to the simple name lives in the default package.
pub fn interface_class_name(interface: &Interface) -> Result<ClassName> {
    let qualified = &interface.qualified_name;
    let simple = &interface.simple_name;

    let package = if !simple.is_empty() && qualified == simple {
        Some("")
    } else {
        qualified
            .strip_suffix(simple.as_str())
            .and_then(|p| p.strip_suffix('.'))
            .filter(|p| !simple.is_empty() && !p.is_empty())
    };

    match package {
        Some(package) => Ok(ClassName::new(package, simple.as_str())),
        None => Err(GenerateError::MalformedName {
            qualified_name: qualified.clone(),
            simple_name: simple.clone(),
        }),
    }
}

/// Start a public class named `output_class_name` that implements the
/// interface. The class is placed in the interface's package.
pub fn begin_class(interface: &Interface, output_class_name: &str) -> Result<ClassBuilder> {
    let interface_name = interface_class_name(interface)?;
    let class_name = ClassName::new(interface_name.package.as_str(), output_class_name);
    debug!("Generating {} for {}", class_name.qualified(), interface_name.qualified());

    Ok(ClassBuilder::new(class_name, interface_name).doc(CLASS_DESC))
}

/// Add the private delegate field and inject it through the constructor.
pub fn add_delegate(
    builder: ClassBuilder,
    constructor: &mut ConstructorBuilder,
    binding: &DelegateBinding,
) -> ClassBuilder {
    let delegate = ClassName::new(binding.package.as_str(), binding.class_name.as_str());
    debug!("Adding delegate field {}: {}", binding.field_name, delegate.qualified());

    constructor
        .parameter(&binding.field_name, delegate.to_type_ref())
        .statement(Statement::AssignField {
            field: binding.field_name.clone(),
            param: binding.field_name.clone(),
        });

    builder.field(Field {
        name: binding.field_name.clone(),
        ty: delegate,
        modifier: Modifier::Private,
    })
}

/// One public `@Override` method per interface method, each forwarding
/// its arguments to the delegate field.
pub fn add_forwarding_methods(
    mut builder: ClassBuilder,
    interface: &Interface,
    delegate_field: &str,
) -> ClassBuilder {
    for method in interface.methods() {
        debug!("Forwarding {}.{}", interface.simple_name, method.name);

        let mut method_builder = MethodBuilder::new(method.name.as_str())
            .modifier(Modifier::Public)
            .overrides()
            .returns(method.return_type.clone());

        for param in &method.parameters {
            method_builder = method_builder.parameter(&param.name, param.ty.clone());
        }

        let statement = Statement::Forward {
            returns: !method.return_type.is_void(),
            target: delegate_field.to_string(),
            method: method.name.clone(),
            args: method.parameters.iter().map(|p| p.name.clone()).collect(),
        };

        builder = builder.method(method_builder.statement(statement).build());
    }

    builder
}

/// Run the whole pipeline for one interface.
pub fn generate(
    interface: &Interface,
    binding: &DelegateBinding,
    output_class_name: &str,
) -> Result<GeneratedClass> {
    let builder = begin_class(interface, output_class_name)?;

    let mut constructor = ConstructorBuilder::new();
    let builder = add_delegate(builder, &mut constructor, binding);
    let builder = add_forwarding_methods(builder, interface, &binding.field_name);

    Ok(builder.constructor(constructor.build()).build())
}

/// Joins forwarded argument names the way they appear in a call.
pub fn join_args(args: &[String]) -> String {
    args.join(",")
}
