/// Symbols drawn by the interface, ASCII by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub sequence_tab: &'static str,
    pub variant_tab: &'static str,
    pub interval_tab: &'static str,
    pub ok: &'static str,
    pub err: &'static str,
    pub focus: &'static str,
    pub cursor: &'static str,
    pub h_separator: &'static str,
    pub choice_left: &'static str,
    pub choice_right: &'static str,
}

pub fn select(fancy_requested: bool) -> Glyphs {
    if fancy_requested {
        fancy()
    } else {
        ascii()
    }
}

fn ascii() -> Glyphs {
    Glyphs {
        sequence_tab: "",
        variant_tab: "",
        interval_tab: "",
        ok: "[ok]",
        err: "[!]",
        focus: ">",
        cursor: "_",
        h_separator: "-",
        choice_left: "<",
        choice_right: ">",
    }
}

fn fancy() -> Glyphs {
    Glyphs {
        sequence_tab: "🔬 ",
        variant_tab: "🧬 ",
        interval_tab: "📊 ",
        ok: "✓",
        err: "✗",
        focus: "▶",
        cursor: "█",
        h_separator: "─",
        choice_left: "◀",
        choice_right: "▶",
    }
}
