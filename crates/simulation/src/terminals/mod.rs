mod allocation;


pub use allocation::{
    allocate_terminal, can_ever_allocate, class_accepts, find_free_terminal, has_usable_terminal,
    preferred_kind,
};
