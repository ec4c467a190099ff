mod stroke;
pub use stroke::*;

mod store;
pub use store::*;

mod selector;
pub use selector::*;

mod grab;
pub use grab::*;

mod editor;
pub use editor::*;
