mod options;

pub use options::GameOptions;
