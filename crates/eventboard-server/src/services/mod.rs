// Services layer for business logic
// Services own validation and ID allocation, calling storage directly

pub mod category;
pub mod counter;
pub mod event;

pub use category::CategoryService;
pub use counter::CounterService;
pub use event::EventService;
