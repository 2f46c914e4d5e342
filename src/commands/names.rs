//! Names command handler
//!
//! Shows every name and path derived for one package identifier.

use anyhow::Result;
use serde::Serialize;

use grammar_forge::application::build::{exported_symbol, resolver_for};
use grammar_forge::config::BuildConfig;
use grammar_forge::domain::services::grammar_name_of;
use grammar_forge::domain::value_objects::{GrammarSource, PackageKind};
use grammar_forge::presentation::OutputFormat;

use super::context::CommandContext;

#[derive(Debug, Serialize)]
struct DerivedNames {
    package: String,
    kind: PackageKind,
    base_name: String,
    package_dir: String,
    artifact: String,
    grammar_name: Option<String>,
    output: Option<String>,
    exported_symbol: Option<String>,
    glue: String,
}

fn derive(source: &GrammarSource, config: &BuildConfig) -> DerivedNames {
    let resolver = resolver_for(config);
    let grammar_name = grammar_name_of(source.base_name()).ok();
    DerivedNames {
        package: source.identifier().to_string(),
        kind: source.kind(),
        base_name: source.base_name().to_string(),
        package_dir: resolver.package_dir(source).display().to_string(),
        artifact: resolver.artifact_name(source),
        output: grammar_name
            .as_deref()
            .map(|g| resolver.output_path(g).display().to_string()),
        exported_symbol: grammar_name.as_deref().map(exported_symbol),
        grammar_name,
        glue: resolver.glue_path(source.base_name()).display().to_string(),
    }
}

pub fn cmd_names(ctx: CommandContext, package: &str) -> Result<()> {
    let source = GrammarSource::new(package)?;
    let names = derive(&source, &ctx.config.build);

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    let missing = "(not a tree-sitter-<name> package)".to_string();
    println!("package:   {}", names.package);
    println!("kind:      {:?}", names.kind);
    println!("directory: {}", names.package_dir);
    println!("artifact:  {}", names.artifact);
    println!("grammar:   {}", names.grammar_name.as_ref().unwrap_or(&missing));
    println!("output:    {}", names.output.as_ref().unwrap_or(&missing));
    println!("symbol:    {}", names.exported_symbol.as_ref().unwrap_or(&missing));
    println!("glue:      {}", names.glue);
    Ok(())
}
