use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::str::FromStr;
use anyhow::{bail, Context};
use convert_case::{Case, Casing};
use log::{debug, error, info, warn};
use structopt::StructOpt;
use delegen::generator::{self, ClassName, GeneratedClass};
use delegen::models::{Input, Target};
use delegen::render::{java, mod_file, rust};
use delegen::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    Java,
    Rust,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "java" => Ok(Self::Java),
            "rust" => Ok(Self::Rust),
            _ => Err(format!("unknown backend '{}', expected 'java' or 'rust'", s)),
        }
    }
}

#[derive(StructOpt)]
#[structopt(about = "Generates classes that forward an interface to a delegate")]
struct Opt {
    #[structopt(short, long, parse(from_os_str))]
    input_file: PathBuf,

    #[structopt(short, long, parse(from_os_str))]
    output_dir: PathBuf,

    #[structopt(short, long, default_value = "java", possible_values = &["java", "rust"])]
    backend: Backend,

    /// Appended to the interface name when no outputClassName is given
    #[structopt(short, long, default_value = "Impl")]
    suffix: String,

    /// Write Rust output without running rustfmt
    #[structopt(long)]
    no_fmt: bool,

    /// Keep generating the remaining interfaces after one fails
    #[structopt(long)]
    keep_going: bool,
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", format!("{}=INFO", env!("CARGO_PKG_NAME")));
    }
    env_logger::init();

    let opts: Opt = Opt::from_args();
    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&opts) {
        error!("{:#}", e);
        exit(1);
    }
}

fn run(opts: &Opt) -> anyhow::Result<()> {
    debug!("Reading input");
    let f = std::fs::File::open(&opts.input_file)
        .with_context(|| format!("Failed to open input file {:?}", opts.input_file))?;
    let input: Input = serde_json::from_reader(&f).context("Failed to deserialize input")?;

    let mut written = Vec::with_capacity(input.interfaces.len());
    let mut failed = 0;
    for target in &input.interfaces {
        let class_name = output_class_name(target, &opts.suffix);
        let class = match generator::generate(&target.interface, &target.delegate, &class_name) {
            Ok(class) => class,
            Err(e) if opts.keep_going => {
                error!("Skipping {}: {}", target.interface.qualified_name, e);
                failed += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to generate {}", target.interface.qualified_name)
                });
            }
        };

        let out_path = build_path(&class.name, opts.backend, &opts.output_dir);
        let source = render(&class, opts);
        write_file(&out_path, &source)?;
        info!("Generated {} at {:?}", class.name.qualified(), out_path);
        written.push(out_path);
    }

    if opts.backend == Backend::Rust {
        for dir in module_dirs(&opts.output_dir, &written) {
            let tokens = mod_file::gen_mod(&mod_file::get_submods(&dir)?);
            // The output directory is the crate's `src`, so paths start at `crate::`
            let root_file = if dir == opts.output_dir { "lib.rs" } else { "mod.rs" };
            let out_path = dir.join(root_file);
            debug!("Generating mod file {:?}", out_path);
            write_file(&out_path, &format_rust(tokens.to_string(), opts))?;
        }
    }

    if failed > 0 {
        bail!("{} of {} interfaces failed", failed, input.interfaces.len());
    }
    Ok(())
}

fn output_class_name(target: &Target, suffix: &str) -> String {
    match &target.output_class_name {
        Some(name) => name.clone(),
        None => format!("{}{}", target.interface.simple_name, suffix),
    }
}

fn render(class: &GeneratedClass, opts: &Opt) -> String {
    match opts.backend {
        Backend::Java => java::render(class),
        Backend::Rust => format_rust(rust::render(class).to_string(), opts),
    }
}

fn format_rust(tokens: String, opts: &Opt) -> String {
    if opts.no_fmt {
        return tokens;
    }

    match fmt::rustfmt(tokens.clone()) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!("Writing unformatted output: {:#}", e);
            tokens
        }
    }
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create package directory {:?}", parent))?;
    }

    let mut f = std::fs::File::create(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut writer = BufWriter::new(&mut f);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// `com.example.GreeterImpl` lands at `com/example/GreeterImpl.java`, or
/// `com/example/greeter_impl.rs` for Rust output.
fn build_path(name: &ClassName, backend: Backend, out_dir: &Path) -> PathBuf {
    let mut out_path = PathBuf::from(out_dir);
    name.package
        .split('.')
        .filter(|f| !f.is_empty())
        .for_each(|f| match backend {
            Backend::Java => out_path.push(f),
            Backend::Rust => out_path.push(rust::safe_name(f)),
        });

    let file_name = match backend {
        Backend::Java => format!("{}.java", name.simple_name),
        Backend::Rust => format!("{}.rs", name.simple_name.to_case(Case::Snake)),
    };
    out_path.push(file_name);
    out_path
}

/// Every directory between the output root and a written file needs a
/// `mod.rs`.
fn module_dirs(out_dir: &Path, written: &[PathBuf]) -> BTreeSet<PathBuf> {
    let mut dirs = BTreeSet::new();
    for path in written {
        let mut dir = path.parent();
        while let Some(d) = dir {
            if !d.starts_with(out_dir) {
                break;
            }
            dirs.insert(d.to_path_buf());
            if d == out_dir {
                break;
            }
            dir = d.parent();
        }
    }
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use delegen::models::{DelegateBinding, Interface};
    use tempfile::TempDir;

    const MIXED_INPUT: &str = r#"{
        "interfaces": [
            {
                "qualifiedName": "com.example.Greeter",
                "simpleName": "Greeter",
                "members": [{ "kind": "method", "name": "reset", "returnType": { "type": "void" } }],
                "delegate": {
                    "delegatePackage": "com.example",
                    "delegateClassName": "DefaultGreeter",
                    "delegateSimpleName": "delegate"
                }
            },
            {
                "qualifiedName": "com.example.Greeting",
                "simpleName": "Broken",
                "members": [],
                "delegate": {
                    "delegatePackage": "com.example",
                    "delegateClassName": "DefaultBroken",
                    "delegateSimpleName": "delegate"
                }
            },
            {
                "qualifiedName": "com.example.Store",
                "simpleName": "Store",
                "members": [],
                "delegate": {
                    "delegatePackage": "com.example",
                    "delegateClassName": "MemoryStore",
                    "delegateSimpleName": "store"
                }
            }
        ]
    }"#;

    fn opts(temp_dir: &TempDir, backend: Backend, keep_going: bool) -> Opt {
        let input_file = temp_dir.path().join("input.json");
        std::fs::write(&input_file, MIXED_INPUT).unwrap();

        Opt {
            input_file,
            output_dir: temp_dir.path().join("out"),
            backend,
            suffix: "Impl".to_string(),
            no_fmt: true,
            keep_going,
        }
    }

    fn target(output_class_name: Option<&str>) -> Target {
        Target {
            interface: Interface {
                qualified_name: "com.example.Greeter".to_string(),
                simple_name: "Greeter".to_string(),
                members: Vec::new(),
            },
            delegate: DelegateBinding {
                package: "com.example".to_string(),
                class_name: "DefaultGreeter".to_string(),
                field_name: "delegate".to_string(),
            },
            output_class_name: output_class_name.map(str::to_string),
        }
    }

    #[test]
    fn test_output_class_name() {
        assert_eq!(output_class_name(&target(None), "Impl"), "GreeterImpl");
        assert_eq!(output_class_name(&target(Some("Forwarding")), "Impl"), "Forwarding");
    }

    #[test]
    fn test_build_path() {
        let name = ClassName::new("com.example", "GreeterImpl");
        assert_eq!(
            build_path(&name, Backend::Java, Path::new("out")),
            PathBuf::from("out/com/example/GreeterImpl.java"),
        );
        assert_eq!(
            build_path(&name, Backend::Rust, Path::new("out")),
            PathBuf::from("out/com/example/greeter_impl.rs"),
        );
        assert_eq!(
            build_path(&ClassName::new("org.crate", "GreeterImpl"), Backend::Rust, Path::new("out")),
            PathBuf::from("out/org/crate_/greeter_impl.rs"),
        );
        assert_eq!(
            build_path(&ClassName::new("", "GreeterImpl"), Backend::Java, Path::new("out")),
            PathBuf::from("out/GreeterImpl.java"),
        );
    }

    #[test]
    fn test_module_dirs() {
        let written = vec![
            PathBuf::from("out/com/example/greeter_impl.rs"),
            PathBuf::from("out/com/other/store_impl.rs"),
            PathBuf::from("out/root_impl.rs"),
        ];
        let dirs = module_dirs(Path::new("out"), &written).into_iter().collect::<Vec<_>>();

        assert_eq!(dirs, vec![
            PathBuf::from("out"),
            PathBuf::from("out/com"),
            PathBuf::from("out/com/example"),
            PathBuf::from("out/com/other"),
        ]);
    }

    #[test]
    fn test_demo_input() {
        let input: Input = serde_json::from_str(include_str!("../demos/greeter.json")).unwrap();
        let classes = input.interfaces.iter()
            .map(|t| generator::generate(&t.interface, &t.delegate, &output_class_name(t, "Impl")).unwrap())
            .collect::<Vec<_>>();

        assert_eq!(classes[0].methods.len(), 4);
        assert_eq!(classes[1].name, ClassName::new("com.example.store", "ForwardingStore"));

        let source = java::render(&classes[0]);
        assert!(source.contains("import java.util.Date;"));
        assert!(source.contains("public String[] history(Date since) {\n        return greeter.history(since);\n    }"));

        let source = java::render(&classes[1]);
        assert!(!source.contains("import "));
        assert!(source.contains("public void put(String key, byte[] value) {\n        store.put(key,value);\n    }"));
    }

    #[test]
    fn test_run_aborts_on_malformed_interface() {
        let temp_dir = TempDir::new().unwrap();
        let opts = opts(&temp_dir, Backend::Java, false);

        let err = run(&opts).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to generate com.example.Greeting"));

        let package = opts.output_dir.join("com/example");
        assert!(package.join("GreeterImpl.java").exists());
        assert!(!package.join("BrokenImpl.java").exists());
        assert!(!package.join("StoreImpl.java").exists());
    }

    #[test]
    fn test_run_keep_going() {
        let temp_dir = TempDir::new().unwrap();
        let opts = opts(&temp_dir, Backend::Java, true);

        let err = run(&opts).unwrap_err();
        assert_eq!(err.to_string(), "1 of 3 interfaces failed");

        let package = opts.output_dir.join("com/example");
        assert!(package.join("GreeterImpl.java").exists());
        assert!(!package.join("BrokenImpl.java").exists());
        assert!(package.join("StoreImpl.java").exists());
    }

    #[test]
    fn test_run_rust_module_tree() {
        let temp_dir = TempDir::new().unwrap();
        let opts = opts(&temp_dir, Backend::Rust, true);
        assert!(run(&opts).is_err());

        let out = &opts.output_dir;
        assert!(out.join("lib.rs").exists());
        assert!(!out.join("mod.rs").exists());
        assert!(out.join("com/mod.rs").exists());
        assert!(out.join("com/example/greeter_impl.rs").exists());
        assert!(out.join("com/example/store_impl.rs").exists());

        let lib = std::fs::read_to_string(out.join("lib.rs")).unwrap();
        assert_eq!(lib, quote::quote!(pub mod com;).to_string());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("rust".parse::<Backend>(), Ok(Backend::Rust));
        assert!("kotlin".parse::<Backend>().is_err());
    }
}
