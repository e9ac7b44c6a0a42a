#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use themeparty_runtime::ThemeRegistry;
use themeparty_style::{ColorRef, Rgba};

const THEMES: [Option<&str>; 4] = [None, Some("dark"), Some("light"), Some("ghost")];
const COLORS: [&str; 3] = ["primary", "secondary", "accent"];

#[derive(Debug, Arbitrary)]
enum Op {
    Register { theme: u8, colors: Vec<(u8, u8)> },
    Change { theme: u8 },
    Fork { theme: u8 },
    Resolve { color: u8 },
}

fn theme(i: u8) -> Option<&'static str> {
    THEMES[usize::from(i) % THEMES.len()]
}

fn color_name(i: u8) -> &'static str {
    COLORS[usize::from(i) % COLORS.len()]
}

type Model = HashMap<Option<&'static str>, HashMap<&'static str, Rgba>>;

fn expect(model: &Model, selected: Option<&'static str>, name: &str, missing: Rgba) -> Rgba {
    model
        .get(&selected)
        .and_then(|colors| colors.get(name).copied())
        .unwrap_or(missing)
}

fuzz_target!(|ops: Vec<Op>| {
    if ops.len() > 256 {
        return;
    }

    let missing = Rgba::new(0.5, 0.25, 0.125, 1.0);
    let registry = ThemeRegistry::new(missing);

    // Shadow model: theme contents and the selection of every fork.
    let mut model = Model::new();
    model.insert(None, HashMap::new());
    let mut selected: Option<&'static str> = None;
    let mut forks: Vec<(ThemeRegistry, Option<&'static str>)> = Vec::new();

    for op in ops {
        match op {
            Op::Register { theme: t, colors } => {
                let entries: HashMap<&'static str, Rgba> = colors
                    .iter()
                    .take(8)
                    .map(|&(c, v)| (color_name(c), Rgba::from_u8(v, v, v, 255)))
                    .collect();
                registry.register_colors(theme(t), entries.clone());
                model.insert(theme(t), entries);
            }
            Op::Change { theme: t } => {
                registry.change_theme(theme(t), None);
                selected = theme(t);
            }
            Op::Fork { theme: t } => {
                if forks.len() < 8 {
                    forks.push((registry.clone_with_selection(theme(t)), theme(t)));
                }
            }
            Op::Resolve { color } => {
                let name = color_name(color);
                assert_eq!(
                    registry.theme_color(&ColorRef::named(name)),
                    expect(&model, selected, name, missing)
                );
                for (fork, pinned) in &forks {
                    assert_eq!(fork.theme_color_named(name), expect(&model, *pinned, name, missing));
                }
            }
        }
    }
});
