use crate::entities::ItemQtys;

/// Storage aisle: the units of every item that can be picked from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aisle {
    pub id: usize,
    /// Available quantity per item
    pub supply: ItemQtys,
}

impl Aisle {
    pub fn new(id: usize, supply: ItemQtys) -> Self {
        Self { id, supply }
    }
}
