use super::load;
use crate::cli::InspectArgs;
use crate::error::Result;
use mmtfview::engine::Structure;
use std::fmt::Write;

pub fn run(args: InspectArgs) -> Result<()> {
    let structure = load(&args.input, &args.decode)?;
    print!("{}", render(&structure));
    Ok(())
}

/// Formats metadata and hierarchy counts, one `key: value` pair per line.
pub fn render(structure: &Structure) -> String {
    let metadata = structure.metadata();
    let or_dash = |value: Option<&str>| value.unwrap_or("-").to_string();

    let mut out = String::new();
    let mut line = |key: &str, value: String| {
        let _ = writeln!(out, "{key:<18}{value}");
    };
    line("id:", or_dash(metadata.structure_id.as_deref()));
    line("title:", or_dash(metadata.title.as_deref()));
    line(
        "methods:",
        if metadata.experimental_methods.is_empty() {
            "-".to_string()
        } else {
            metadata.experimental_methods.join(", ")
        },
    );
    line(
        "resolution:",
        metadata
            .resolution
            .map_or_else(|| "-".to_string(), |r| format!("{r:.2}")),
    );
    line("deposited:", or_dash(metadata.deposition_date.as_deref()));
    line("space group:", or_dash(metadata.space_group.as_deref()));
    if let Some(cell) = &metadata.unit_cell {
        line(
            "unit cell:",
            format!(
                "{:.3} {:.3} {:.3} {:.2} {:.2} {:.2}",
                cell.a, cell.b, cell.c, cell.alpha, cell.beta, cell.gamma
            ),
        );
    }
    line(
        "format:",
        format!("MMTF {} ({})", metadata.mmtf_version, metadata.mmtf_producer),
    );
    line("models:", structure.model_count().to_string());
    line("chains:", structure.chain_count().to_string());
    line("groups:", structure.group_count().to_string());
    line("atoms:", structure.atom_count().to_string());
    line(
        "bonds:",
        match structure.bond_count() {
            Ok(count) => count.to_string(),
            Err(e) => format!("unavailable ({e})"),
        },
    );
    line("entities:", structure.entities().len().to_string());
    line("assemblies:", metadata.bio_assemblies.len().to_string());
    if structure.is_truncated() {
        line("note:", "only the first model was kept".to_string());
    }
    out
}
