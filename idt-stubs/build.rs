/// Build script: reads stubgen.json, generates the handler and gate C
/// fragments via idt-stubgen, writes them to OUT_DIR for inclusion in lib.rs.
use idt_stubgen::{emit, GeneratorConfig, Section};
use std::path::Path;

fn main() {
    let config_path = "stubgen.json";
    println!("cargo:rerun-if-changed={config_path}");

    let config = GeneratorConfig::load(Path::new(config_path)).expect("Invalid stubgen.json");
    let out_dir = std::env::var("OUT_DIR").unwrap();

    for (section, file) in [
        (Section::Handlers, "interrupt_handlers.c"),
        (Section::Gates, "interrupt_gates.c"),
        (Section::Prototypes, "interrupt_handlers.h"),
    ] {
        let code = emit::emit(&GeneratorConfig {
            section,
            ..config.clone()
        });
        let dest = Path::new(&out_dir).join(file);
        std::fs::write(&dest, code).expect("Cannot write generated C fragment");
    }
}
