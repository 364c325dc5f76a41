use crate::model::Entry;

pub trait Source {
    fn scan(&self) -> Vec<Entry>;
}

pub mod desktop;
