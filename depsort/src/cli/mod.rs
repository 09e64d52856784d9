mod sort;

pub use self::sort::Sort;
