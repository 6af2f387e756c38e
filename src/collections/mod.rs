//! Containers used by the simulation.

pub mod linked_list;

pub use linked_list::{Iter, LinkedList, LinkedListError, NodeHandle};
