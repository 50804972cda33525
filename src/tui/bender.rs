//! ASCII talking head: a speech bubble over a robot

/// Widest line inside the bubble
pub const BUBBLE_WIDTH: usize = 40;

const ROBOT: &str = r#"   \
    \
     ( )
      H
      H
     _H_
  .-'-.-'-.
 /         \
|           |
|   .-------'._
|  / /  '.' '. \
|  \ \ @   @ / /
|   '---------'
|    _______|
|  .'-+-+-+|
|  '.-+-+-+|
|    """""" |
'-.__   __.-'
     """"#;

/// Render `message` in a speech bubble above the robot
pub fn say(message: &str) -> String {
    let lines = wrap(message, BUBBLE_WIDTH);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!(" {}\n", "_".repeat(width + 2)));

    if lines.len() == 1 {
        out.push_str(&format!("< {} >\n", lines[0]));
    } else {
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let (open, close) = match i {
                0 => ('/', '\\'),
                i if i == last => ('\\', '/'),
                _ => ('|', '|'),
            };
            let pad = width - line.chars().count();
            out.push_str(&format!("{open} {line}{} {close}\n", " ".repeat(pad)));
        }
    }

    out.push_str(&format!(" {}\n", "-".repeat(width + 2)));
    out.push_str(ROBOT);
    out
}

/// Greedy word wrap; words longer than `width` are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let chunk_len = chunk.len();
                let needed = if current_len == 0 { chunk_len } else { current_len + 1 + chunk_len };
                if needed > width && current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(chunk);
                current_len += chunk_len;
            }
        }

        lines.push(current);
    }

    lines
}
