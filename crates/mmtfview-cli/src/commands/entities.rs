use super::load;
use crate::cli::InspectArgs;
use crate::error::Result;
use mmtfview::engine::Structure;
use mmtfview::workflows;

pub fn run(args: InspectArgs) -> Result<()> {
    let structure = load(&args.input, &args.decode)?;
    print!("{}", render(&structure)?);
    Ok(())
}

/// Entity rows: index, kind, chain ids, description and sequence, tab separated.
pub fn render(structure: &Structure) -> Result<String> {
    let summary = workflows::summarize(structure)?;
    if summary.entities.is_empty() {
        return Ok(String::new());
    }
    let mut out = String::from("#\tkind\tchains\tdescription\tsequence\n");
    for entity in &summary.entities {
        out.push_str(&entity.to_string());
        out.push('\n');
    }
    Ok(out)
}
