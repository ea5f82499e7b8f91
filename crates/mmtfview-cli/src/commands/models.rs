use super::chains::view_line;
use super::load;
use crate::cli::InspectArgs;
use crate::error::Result;
use mmtfview::engine::Structure;

pub fn run(args: InspectArgs) -> Result<()> {
    let structure = load(&args.input, &args.decode)?;
    print!("{}", render(&structure));
    Ok(())
}

pub fn render(structure: &Structure) -> String {
    structure.models().iter().map(view_line).collect()
}
