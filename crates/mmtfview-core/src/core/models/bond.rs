/// A bond between two atoms of a structure, in global atom indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub first: usize,
    pub second: usize,
    /// Bond order, when the container records one.
    pub order: Option<i32>,
}

impl Bond {
    pub fn new(first: usize, second: usize, order: Option<i32>) -> Self {
        Self {
            first,
            second,
            order,
        }
    }

    /// Whether both atoms fall below `atom_count`.
    pub fn within(&self, atom_count: usize) -> bool {
        self.first < atom_count && self.second < atom_count
    }
}
