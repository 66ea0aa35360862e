mod thoughts;
pub use thoughts::ThoughtsView;
