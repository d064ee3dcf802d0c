use anyhow::Result;
use comfy_table::Table;

use gft_cli::pipeline::run_conversion;
use gft_cli::types::{ConversionRequest, ConversionResult};
use gft_model::{Namespace, ResourceKind, canonical_url};

use crate::cli::ConvertArgs;
use crate::summary::apply_table_style;

pub fn run_kinds() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Type", "DIMDI", "BFARM"]);
    apply_table_style(&mut table);
    for kind in ResourceKind::ALL {
        let url = |namespace| canonical_url(kind, namespace).unwrap_or("unsupported");
        table.add_row(vec![
            kind.as_str(),
            url(Namespace::Dimdi),
            url(Namespace::Bfarm),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_convert(args: &ConvertArgs) -> Result<ConversionResult> {
    let request = ConversionRequest {
        input: args.input.clone(),
        kind: args.kind.into(),
        version: args.catalog_version.clone(),
        selector: args.url.into(),
        output_dir: args.output.clone(),
    };
    run_conversion(&request)
}
