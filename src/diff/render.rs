/// Columnar rendering of one gained/lost capability with its call path.
use super::reconcile::DiffEntry;
use crate::analyzer::{Frame, Site};

/// Minimal width of the location column, including padding.
const MIN_LOCATION_WIDTH: usize = 10;

/// Spaces between the location column and the frame name.
const LOCATION_PADDING: usize = 2;

/// Render one entry: a header line naming the package and capability,
/// followed by one line per call-path frame with frame names aligned into a
/// common column.
///
/// Each line is prefixed with the entry's side marker. A frame with a known
/// source location shows it as `file:line:column` in the location column;
/// a frame without one contributes only the padded marker cell, with no
/// residual location text. The location column is as wide as the longest
/// cell plus padding, but never narrower than a fixed minimum, so names line
/// up even when location strings vary in length.
#[must_use]
pub fn render_entry(entry: &DiffEntry<'_>) -> String {
    let marker = entry.side.marker();
    let mut out = format!(
        "{marker} Package {} has capability {}:\n",
        entry.key.package, entry.key.capability
    );

    let cells: Vec<String> = entry.path.iter().map(|f| location_cell(marker, f)).collect();
    let width = column_width(&cells);
    for (cell, frame) in cells.iter().zip(entry.path) {
        out.push_str(cell);
        for _ in cell.chars().count()..width {
            out.push(' ');
        }
        out.push_str(&frame.name);
        out.push('\n');
    }
    out
}

/// Render a whole report: every entry in order, successive entries
/// separated by exactly one blank line, no leading blank line before the
/// first. Empty input renders as the empty string.
#[must_use]
pub fn render_report(entries: &[DiffEntry<'_>]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_entry(entry));
    }
    out
}

fn location_cell(marker: char, frame: &Frame) -> String {
    match &frame.site {
        Some(Site {
            filename,
            line,
            column,
        }) => format!("{marker} {filename}:{line}:{column}"),
        None => format!("{marker} "),
    }
}

fn column_width(cells: &[String]) -> usize {
    let widest = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    MIN_LOCATION_WIDTH.max(widest + LOCATION_PADDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Capability;
    use crate::diff::Side;
    use crate::snapshot::SnapshotKey;

    fn frame(name: &str, site: Option<(&str, u64, u64)>) -> Frame {
        Frame {
            name: name.to_owned(),
            site: site.map(|(filename, line, column)| Site {
                filename: filename.to_owned(),
                line,
                column,
            }),
        }
    }

    fn entry<'a>(side: Side, key: &'a SnapshotKey, path: &'a [Frame]) -> DiffEntry<'a> {
        DiffEntry { side, key, path }
    }

    #[test]
    fn test_header_line() {
        let key = SnapshotKey {
            capability: Capability::Network,
            package: "example.com/pkg/a".to_owned(),
        };
        let rendered = render_entry(&entry(Side::Gained, &key, &[]));
        assert_eq!(
            rendered,
            "> Package example.com/pkg/a has capability CAPABILITY_NETWORK:\n"
        );
    }

    #[test]
    fn test_lost_entries_use_left_marker() {
        let key = SnapshotKey {
            capability: Capability::UnsafePointer,
            package: "pkg/x".to_owned(),
        };
        let path = [frame("x.Cast", None)];
        let rendered = render_entry(&entry(Side::Lost, &key, &path));
        for line in rendered.lines() {
            assert!(line.starts_with('<'), "line not marked: {line:?}");
        }
    }

    #[test]
    fn test_names_align_across_varying_location_widths() {
        let key = SnapshotKey {
            capability: Capability::Network,
            package: "pkg/a".to_owned(),
        };
        let path = [
            frame("pkg/a.Outer", Some(("a/very/long/path/file.go", 120, 15))),
            frame("net.Dial", Some(("d.go", 1, 1))),
        ];
        let rendered = render_entry(&entry(Side::Gained, &key, &path));
        let lines: Vec<&str> = rendered.lines().skip(1).collect();
        let col0 = lines[0].find("pkg/a.Outer").unwrap();
        let col1 = lines[1].find("net.Dial").unwrap();
        assert_eq!(col0, col1);
        // Longest cell: "> a/very/long/path/file.go:120:15" plus padding.
        assert_eq!(col0, "> a/very/long/path/file.go:120:15".len() + 2);
    }

    #[test]
    fn test_minimum_column_width_applies() {
        let key = SnapshotKey {
            capability: Capability::Files,
            package: "p".to_owned(),
        };
        let path = [frame("p.Open", None)];
        let rendered = render_entry(&entry(Side::Gained, &key, &path));
        let line = rendered.lines().nth(1).unwrap();
        // The marker cell "> " is padded out to the minimum column width.
        assert_eq!(line, format!("{}p.Open", format!("{:<10}", "> ")));
    }

    #[test]
    fn test_report_separates_entries_with_one_blank_line() {
        let gained_key = SnapshotKey {
            capability: Capability::Files,
            package: "pkg/b".to_owned(),
        };
        let lost_key = SnapshotKey {
            capability: Capability::Network,
            package: "pkg/a".to_owned(),
        };
        let gained_path = [frame("b.Open", None)];
        let lost_path = [frame("a.Dial", None)];
        let entries = [
            entry(Side::Gained, &gained_key, &gained_path),
            entry(Side::Lost, &lost_key, &lost_path),
        ];
        let report = render_report(&entries);

        // No leading blank line, one blank line between the two entries.
        assert!(report.starts_with("> Package"));
        assert_eq!(report.matches("\n\n").count(), 1);
        assert_eq!(
            report,
            format!(
                "{}\n{}",
                render_entry(&entries[0]),
                render_entry(&entries[1])
            )
        );
    }

    #[test]
    fn test_single_entry_report_has_no_separator() {
        let key = SnapshotKey {
            capability: Capability::Exec,
            package: "pkg/e".to_owned(),
        };
        let path = [frame("e.Run", None)];
        let entries = [entry(Side::Gained, &key, &path)];
        assert_eq!(render_report(&entries), render_entry(&entries[0]));
    }

    #[test]
    fn test_empty_report_renders_nothing() {
        assert_eq!(render_report(&[]), "");
    }

    #[test]
    fn test_frame_without_location_has_no_location_text() {
        let key = SnapshotKey {
            capability: Capability::Exec,
            package: "pkg/e".to_owned(),
        };
        let path = [
            frame("pkg/e.Run", Some(("run.go", 9, 2))),
            frame("os/exec.Command", None),
        ];
        let rendered = render_entry(&entry(Side::Gained, &key, &path));
        let bare = rendered.lines().nth(2).unwrap();
        assert!(bare.starts_with("> "));
        assert!(!bare.contains(':'));
        assert!(bare.ends_with("os/exec.Command"));
    }
}
