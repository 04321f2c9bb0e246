use std::fmt::Write;

/// A terminal cell: xterm-256 foreground, background, and the character.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColorChar(pub u8, pub u8, pub char);

/// Renders cells into one string of SGR escapes, only emitting a colour
/// when it changes from the previous cell.
pub fn make_colorstring<I>(cells: I) -> String
    where I: IntoIterator<Item = ColorChar>
{
    let mut st = String::new();
    let mut pfg = None;
    let mut pbg = None;
    for ColorChar(fg, bg, ch) in cells {
        if pfg != Some(fg) {
            // Writing into a String cannot fail.
            let _ = write!(st, "\x1B[38;5;{}m", fg);
            pfg = Some(fg);
        }
        if pbg != Some(bg) {
            let _ = write!(st, "\x1B[48;5;{}m", bg);
            pbg = Some(bg);
        }
        st.push(ch);
    }
    st
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_colours_only_on_change() {
        let cells = [
            ColorChar(7, 0, 'a'),
            ColorChar(7, 0, 'b'),
            ColorChar(7, 232, 'c'),
            ColorChar(9, 232, 'd'),
        ];
        assert_eq!(
            make_colorstring(cells),
            "\x1B[38;5;7m\x1B[48;5;0mab\x1B[48;5;232mc\x1B[38;5;9md"
        );
    }

    #[test]
    fn empty_row() {
        assert_eq!(make_colorstring(Vec::new()), "");
    }
}
