//! Widget implementations for the Synapse UI toolkit.

pub mod dropdown;
pub mod dropdown_button;

pub use dropdown::{ChangeCallback, Dropdown, DropdownOption, DropdownSelected, DropdownStyle};
pub use dropdown_button::{
    ClickCallback, DropdownButton, DropdownButtonClicked, DropdownButtonStyle,
};
