mod aisle;
mod incidence;
mod instance;
mod item_qtys;
mod order;
mod selection;

#[doc(inline)]
pub use aisle::Aisle;
#[doc(inline)]
pub use incidence::IncidenceIndex;
#[doc(inline)]
pub use instance::Instance;
#[doc(inline)]
pub use item_qtys::ItemQtys;
#[doc(inline)]
pub use order::Order;
#[doc(inline)]
pub use selection::Selection;
#[doc(inline)]
pub use selection::SelectionError;
