//! Subject picker: a host owning the selected value, a dropdown reporting
//! changes, and a simulated stream of pointer presses.
//!
//! Run with `cargo run -p synapse-widgets --example subject_picker`.

use simplelog::{Config, LevelFilter, SimpleLogger};
use std::sync::mpsc;
use synapse_core::{Event, Point, PointerHub, Rect, Stylesheet, Theme, Widget};
use synapse_widgets::{Dropdown, DropdownButton, DropdownOption};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let theme = Theme::neural();
    let hub = PointerHub::new();
    let (changes, requested) = mpsc::channel::<String>();

    let mut dropdown = Dropdown::new(
        "math",
        [
            DropdownOption::new("math", "Mathematics"),
            DropdownOption::new("sci", "Science"),
            DropdownOption::new("hist", "History"),
        ],
    )
    .on_change(move |value| {
        // The receiver outlives every press below.
        let _ = changes.send(value.to_string());
    });
    dropdown.layout(Rect::new(16.0, 16.0, 180.0, 36.0));
    dropdown.mount(&hub);

    let presses = [
        ("open the list", Point::new(40.0, 34.0)),
        ("click elsewhere", Point::new(600.0, 400.0)),
        ("open again", Point::new(40.0, 34.0)),
        ("pick Science", Point::new(40.0, 112.0)),
    ];

    for (label, position) in presses {
        let event = Event::click(position);
        hub.dispatch(&event);
        dropdown.event(&event);
        println!("{label:>16}: open={} showing '{}'", dropdown.is_open(), dropdown.selected_label());

        // The host owns the value and pushes it back.
        while let Ok(value) = requested.try_recv() {
            dropdown.set_value(value);
            println!("{:>16}  host accepted '{}'", "", dropdown.value());
        }
    }

    dropdown.unmount();
    println!("listeners after unmount: {}", hub.listener_count());

    let banner = DropdownButton::new("Choose a subject").with_open(true);
    println!("{banner:?}");

    let sheet = Stylesheet::from_theme(&theme);
    if let Some(rule) = sheet.rule(".bg-neural-purple") {
        println!("{rule}");
    }
    Ok(())
}
