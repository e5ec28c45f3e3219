use std::collections::{BTreeSet, HashMap, HashSet};
use crate::generator::{join_args, ClassName, GeneratedClass, Param, Statement};
use crate::models::TypeRef;

const INDENT: &str = "    ";

/// Render a generated class as a Java compilation unit.
pub fn render(class: &GeneratedClass) -> String {
    let names = Names::collect(class);
    let mut w = Writer::default();

    if !class.name.package.is_empty() {
        w.line(&format!("package {};", class.name.package));
        w.blank();
    }

    if !names.imports.is_empty() {
        for import in &names.imports {
            w.line(&format!("import {};", import));
        }
        w.blank();
    }

    if let Some(doc) = &class.doc {
        w.line("/**");
        for line in doc.lines() {
            w.line(format!(" * {}", line).trim_end());
        }
        w.line(" */");
    }

    w.line(&format!(
        "{} class {} implements {} {{",
        class.modifier.keyword(),
        class.name.simple_name,
        names.class(&class.implemented_interface),
    ));
    w.indent += 1;

    for field in &class.fields {
        w.line(&format!("{} {} {};", field.modifier.keyword(), names.class(&field.ty), field.name));
    }

    w.blank();
    w.line(&format!(
        "{} {}({}) {{",
        class.constructor.modifier.keyword(),
        class.name.simple_name,
        names.params(&class.constructor.parameters),
    ));
    w.statements(&class.constructor.body);
    w.line("}");

    for method in &class.methods {
        w.blank();
        if method.is_override {
            w.line("@Override");
        }
        w.line(&format!(
            "{} {} {}({}) {{",
            method.modifier.keyword(),
            names.ty(&method.return_type),
            method.name,
            names.params(&method.parameters),
        ));
        w.statements(&method.body);
        w.line("}");
    }

    w.indent -= 1;
    w.line("}");
    w.out
}

fn statement(statement: &Statement) -> String {
    match statement {
        Statement::AssignField { field, param } => format!("this.{} = {};", field, param),
        Statement::Forward { returns, target, method, args } => {
            let call = format!("{}.{}({});", target, method, join_args(args));
            if *returns {
                format!("return {}", call)
            } else {
                call
            }
        }
    }
}

#[derive(Default)]
struct Writer {
    out: String,
    indent: usize,
}

impl Writer {
    fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn statements(&mut self, body: &[Statement]) {
        self.indent += 1;
        for s in body {
            self.line(&statement(s));
        }
        self.indent -= 1;
    }
}

/// Decides which referenced classes can be written by simple name.
struct Names {
    imports: BTreeSet<String>,
    short: HashSet<String>,
}

impl Names {
    fn collect(class: &GeneratedClass) -> Self {
        let mut referenced = vec![class.implemented_interface.clone()];
        referenced.extend(class.fields.iter().map(|f| f.ty.clone()));

        let mut types: Vec<&TypeRef> = class.constructor.parameters.iter().map(|p| &p.ty).collect();
        for method in &class.methods {
            types.push(&method.return_type);
            types.extend(method.parameters.iter().map(|p| &p.ty));
        }
        referenced.extend(
            types.into_iter()
                .filter(|t| !t.is_builtin())
                .map(|t| ClassName::from_qualified(&t.class)),
        );

        // Simple names claimed by more than one class must stay qualified,
        // including a clash with the generated class itself.
        let mut by_simple: HashMap<&str, HashSet<String>> = HashMap::new();
        by_simple
            .entry(class.name.simple_name.as_str())
            .or_default()
            .insert(class.name.qualified());
        for name in &referenced {
            by_simple.entry(name.simple_name.as_str()).or_default().insert(name.qualified());
        }

        let mut imports = BTreeSet::new();
        let mut short = HashSet::new();
        for name in &referenced {
            if by_simple[name.simple_name.as_str()].len() > 1 {
                continue;
            }
            short.insert(name.qualified());
            let implicit = name.package.is_empty()
                || name.package == "java.lang"
                || name.package == class.name.package;
            if !implicit {
                imports.insert(name.qualified());
            }
        }

        Self { imports, short }
    }

    fn class(&self, name: &ClassName) -> String {
        let qualified = name.qualified();
        if self.short.contains(&qualified) {
            name.simple_name.clone()
        } else {
            qualified
        }
    }

    fn ty(&self, ty: &TypeRef) -> String {
        let base = if ty.is_builtin() {
            ty.class.clone()
        } else {
            self.class(&ClassName::from_qualified(&ty.class))
        };
        if ty.is_array {
            format!("{}[]", base)
        } else {
            base
        }
    }

    fn params(&self, params: &[Param]) -> String {
        params
            .iter()
            .map(|p| format!("{} {}", self.ty(&p.ty), p.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
