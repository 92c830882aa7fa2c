use std::path::PathBuf;

use confindent::Confindent;

fn main() {
    env_logger::init();

    let conf = match Confindent::from_file("generator.conf") {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("Could not parse the configuration file: {}", e);
            std::process::exit(-1);
        }
    };

    let statics = required_path(&conf, "Static");
    let content = required_path(&conf, "Content");
    let template = required_path(&conf, "Template");
    let output = required_path(&conf, "Output");

    if let Err(e) = generator::copy_static(&statics, &output) {
        eprintln!("Failed to copy the static files: {}", e);
        std::process::exit(-1);
    }

    if let Err(e) = generator::generate_pages(&content, &template, &output) {
        eprintln!("Failed to generate the site: {}", e);
        std::process::exit(-1);
    }

    println!("Generated site at: {}", output.to_string_lossy());
}

fn required_path(conf: &Confindent, key: &str) -> PathBuf {
    match conf.child_value(key) {
        Some(val) => PathBuf::from(val),
        None => {
            eprintln!(
                "Please specify where the {} path is in the configuration with the `{}` key",
                key.to_lowercase(),
                key
            );
            std::process::exit(-1);
        }
    }
}
