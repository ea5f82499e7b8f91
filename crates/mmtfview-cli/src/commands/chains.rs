use super::load;
use crate::cli::InspectArgs;
use crate::error::Result;
use mmtfview::engine::{Structure, StructureView};

pub fn run(args: InspectArgs) -> Result<()> {
    let structure = load(&args.input, &args.decode)?;
    print!("{}", render(&structure)?);
    Ok(())
}

pub(crate) fn view_line(view: &StructureView<'_>) -> String {
    format!(
        "{}\tatoms={} groups={} chains={}\n",
        view.id(),
        view.atom_count(),
        view.group_count(),
        view.chain_count()
    )
}

/// One line per distinct chain name, in order of first appearance.
pub fn render(structure: &Structure) -> Result<String> {
    Ok(structure.chains()?.iter().map(view_line).collect())
}
