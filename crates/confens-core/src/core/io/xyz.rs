use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::molecule::Molecule;
use crate::core::utils::elements;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Metadata carried by an XYZ file: the free-form comment on line two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: XyzParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidAtomCount { value: String },
    #[error("File declares zero atoms")]
    EmptyStructure,
    #[error("File ends after {found} of {expected} declared atom records")]
    Truncated { expected: usize, found: usize },
    #[error("Atom record has {found} fields, expected at least 4 (element x y z)")]
    ShortRecord { found: usize },
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidCoordinate { axis: &'static str, value: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Unexpected content after the declared atom records")]
    TrailingContent,
}

fn parse_coordinate(value: &str, axis: &'static str, line: usize) -> Result<f64, XyzError> {
    let parsed: f64 = value.parse().map_err(|_| XyzError::Parse {
        line,
        kind: XyzParseErrorKind::InvalidCoordinate {
            axis,
            value: value.into(),
        },
    })?;
    if !parsed.is_finite() {
        return Err(XyzError::Parse {
            line,
            kind: XyzParseErrorKind::InvalidCoordinate {
                axis,
                value: value.into(),
            },
        });
    }
    Ok(parsed)
}

/// Reader/writer for the plain XYZ structure format: an atom count line, a
/// comment line, then one `element x y z` record per atom. Trailing fields on
/// atom records (charges, gradients) are ignored.
pub struct XyzFile;

impl MolecularFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Molecule, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines.next().transpose()?.ok_or(XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidAtomCount { value: "".into() },
        })?;
        let declared: usize = count_line.trim().parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidAtomCount {
                value: count_line.trim().into(),
            },
        })?;
        if declared == 0 {
            return Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::EmptyStructure,
            });
        }

        let comment = lines.next().transpose()?.ok_or(XyzError::Parse {
            line: 2,
            kind: XyzParseErrorKind::Truncated {
                expected: declared,
                found: 0,
            },
        })?;

        let mut molecule = Molecule::new();
        for index in 0..declared {
            let line_num = index + 3;
            let record = lines.next().transpose()?.ok_or(XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::Truncated {
                    expected: declared,
                    found: index,
                },
            })?;

            let fields: Vec<&str> = record.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::ShortRecord {
                        found: fields.len(),
                    },
                });
            }

            let symbol = fields[0];
            if !elements::is_known_element(symbol) {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::UnknownElement {
                        symbol: symbol.into(),
                    },
                });
            }

            let x = parse_coordinate(fields[1], "x", line_num)?;
            let y = parse_coordinate(fields[2], "y", line_num)?;
            let z = parse_coordinate(fields[3], "z", line_num)?;

            molecule.push_atom(Atom::new(symbol, Point3::new(x, y, z)));
        }

        for (offset, rest) in lines.enumerate() {
            let rest = rest?;
            if !rest.trim().is_empty() {
                return Err(XyzError::Parse {
                    line: declared + 3 + offset,
                    kind: XyzParseErrorKind::TrailingContent,
                });
            }
        }

        Ok((
            molecule,
            XyzMetadata {
                comment: comment.trim_end().to_string(),
            },
        ))
    }

    fn write_to(
        molecule: &Molecule,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", molecule.len())?;
        writeln!(writer, "{}", metadata.comment)?;
        for atom in molecule.atoms() {
            writeln!(
                writer,
                "{:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(content: &str) -> Result<(Molecule, XyzMetadata), XyzError> {
        XyzFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn parses_well_formed_file() {
        let content = "\
3
water, optimized
O    0.000000    0.000000    0.117300
H    0.000000    0.757200   -0.469200
H    0.000000   -0.757200   -0.469200
";
        let (molecule, metadata) = parse(content).unwrap();

        assert_eq!(molecule.len(), 3);
        assert_eq!(metadata.comment, "water, optimized");
        assert_eq!(molecule.atoms()[0].element, "O");
        assert_eq!(molecule.atoms()[1].element, "H");
        assert!((molecule.atoms()[1].position.y - 0.7572).abs() < 1e-12);
    }

    #[test]
    fn tolerates_blank_comment_and_trailing_blank_lines() {
        let content = "1\n\nC 0.0 0.0 0.0\n\n  \n";
        let (molecule, metadata) = parse(content).unwrap();
        assert_eq!(molecule.len(), 1);
        assert_eq!(metadata.comment, "");
    }

    #[test]
    fn ignores_extra_fields_on_atom_records() {
        let content = "1\ngradient columns\nC 1.0 2.0 3.0 0.001 -0.002 0.003\n";
        let (molecule, _) = parse(content).unwrap();
        assert_eq!(molecule.atoms()[0].position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rejects_invalid_atom_count() {
        let err = parse("three\ncomment\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidAtomCount { .. }
            }
        ));
    }

    #[test]
    fn rejects_zero_atoms() {
        let err = parse("0\nempty\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::EmptyStructure
            }
        ));
    }

    #[test]
    fn rejects_truncated_file_with_record_counts() {
        let err = parse("3\ncomment\nC 0.0 0.0 0.0\n").unwrap_err();
        match err {
            XyzError::Parse {
                line,
                kind: XyzParseErrorKind::Truncated { expected, found },
            } => {
                assert_eq!(line, 4);
                assert_eq!(expected, 3);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_element_symbols() {
        let err = parse("1\ncomment\nQq 0.0 0.0 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::UnknownElement { .. }
            }
        ));
    }

    #[test]
    fn rejects_malformed_coordinates_with_axis() {
        let err = parse("1\ncomment\nC 0.0 oops 0.0\n").unwrap_err();
        match err {
            XyzError::Parse {
                line,
                kind: XyzParseErrorKind::InvalidCoordinate { axis, value },
            } => {
                assert_eq!(line, 3);
                assert_eq!(axis, "y");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let err = parse("1\ncomment\nC 0.0 0.0 inf\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate { axis: "z", .. }
            }
        ));
    }

    #[test]
    fn rejects_short_records() {
        let err = parse("1\ncomment\nC 0.0 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::ShortRecord { found: 3 }
            }
        ));
    }

    #[test]
    fn rejects_trailing_structure_content() {
        let err = parse("1\ncomment\nC 0.0 0.0 0.0\nH 1.0 0.0 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            XyzError::Parse {
                line: 4,
                kind: XyzParseErrorKind::TrailingContent
            }
        ));
    }

    #[test]
    fn written_files_parse_back() {
        let molecule = Molecule::from_atoms(vec![
            Atom::new("N", Point3::new(0.0, 0.0, 0.1)),
            Atom::new("H", Point3::new(0.9, 0.0, -0.3)),
        ]);
        let metadata = XyzMetadata {
            comment: "ammonia fragment".into(),
        };

        let mut buffer = Vec::new();
        XyzFile::write_to(&molecule, &metadata, &mut buffer).unwrap();
        let (parsed, parsed_meta) = XyzFile::read_from(&mut Cursor::new(buffer)).unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed_meta.comment, "ammonia fragment");
        assert!((parsed.atoms()[1].position.x - 0.9).abs() < 1e-8);
    }

    #[test]
    fn read_from_path_surfaces_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.xyz");
        let err = XyzFile::read_from_path(&missing).unwrap_err();
        assert!(matches!(err, XyzError::Io(_)));
    }
}
