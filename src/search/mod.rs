mod deep_find;

pub use deep_find::{
    find_all_by_key, find_all_matching, is_present, locate_all_by_key, node_kind, Match,
};
