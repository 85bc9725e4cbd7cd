#![allow(dead_code)]

pub mod keys;
pub mod mock_stack;
pub mod mock_tree;
