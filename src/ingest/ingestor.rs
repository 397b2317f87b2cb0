use crate::attribute_lists::{attribute_file, parse_value};
use crate::core::{AttributeKind, AttributeSpec, ClassIndexBuilder, DatasetHeader, NodeContext};
use crate::error::SliqError;
use crate::utils::file_parsing::{DEFAULT_DELIMITERS, split_fields};
use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything the split engine needs from one ingestion pass.
#[derive(Debug, Clone)]
pub struct Ingestion {
    pub header: DatasetHeader,
    pub context: NodeContext,
    pub work_dir: PathBuf,
    pub records: usize,
}

/// Reads a delimited dataset, assigns rids and writes one unsorted
/// `"<rid> <value>"` file per numeric attribute.
///
/// The first line holds the attribute names. A column is numeric when its
/// value in the first data row parses as a number; the class column never is.
/// Categorical columns are not materialized since they are never split on.
#[derive(Debug, Clone)]
pub struct Ingestor {
    class_index: usize,
    delimiters: String,
}

impl Ingestor {
    pub fn new(class_index: usize) -> Self {
        Self {
            class_index,
            delimiters: DEFAULT_DELIMITERS.to_string(),
        }
    }

    pub fn with_delimiters<S: Into<String>>(mut self, delimiters: S) -> Self {
        self.delimiters = delimiters.into();
        self
    }

    pub fn ingest_file(&self, input: &Path, work_dir: &Path) -> Result<Ingestion, SliqError> {
        let reader = BufReader::new(File::open(input)?);
        self.ingest(reader, &input.display().to_string(), work_dir)
    }

    pub fn ingest<R: BufRead>(
        &self,
        reader: R,
        resource: &str,
        work_dir: &Path,
    ) -> Result<Ingestion, SliqError> {
        if self.delimiters.is_empty() {
            return Err(SliqError::InvalidParameter("delimiters must not be empty".into()));
        }

        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|l| (i + 1, l)))
            .filter(|r| r.as_ref().map_or(true, |(_, l)| !l.trim().is_empty()));

        let Some(first) = lines.next() else {
            return Err(SliqError::InvalidParameter(format!(
                "{resource} has no header line"
            )));
        };
        let (_, header_line) = first?;
        let names = split_fields(&header_line, &self.delimiters);
        check_names(&names)?;

        let Some(first_row) = lines.next() else {
            return Err(SliqError::InvalidParameter(format!(
                "{resource} has no data rows"
            )));
        };
        let (first_line_no, first_row) = first_row?;
        let first_fields = split_fields(&first_row, &self.delimiters);
        check_arity(&first_fields, names.len(), resource, first_line_no)?;

        let specs = names
            .iter()
            .zip(&first_fields)
            .enumerate()
            .map(|(i, (name, value))| {
                let kind = if i == self.class_index {
                    AttributeKind::Class
                } else if parse_value(value).is_some() {
                    AttributeKind::Numeric
                } else {
                    AttributeKind::Categorical
                };
                AttributeSpec::new(name.clone(), kind)
            })
            .collect();
        let header = DatasetHeader::new(specs, self.class_index)?;

        let mut writers = header
            .attributes()
            .iter()
            .map(|a| {
                if a.is_numeric() {
                    let file = File::create(attribute_file(work_dir, &a.name))?;
                    Ok(Some(BufWriter::new(file)))
                } else {
                    Ok(None)
                }
            })
            .collect::<Result<Vec<_>, SliqError>>()?;

        let mut builder = ClassIndexBuilder::new();
        let mut row = RowWriter {
            header: &header,
            writers: &mut writers,
            builder: &mut builder,
            resource,
        };
        row.write(&first_fields, first_line_no)?;
        for line in lines {
            let (line_no, line) = line?;
            let fields = split_fields(&line, &self.delimiters);
            check_arity(&fields, names.len(), resource, line_no)?;
            row.write(&fields, line_no)?;
        }

        for w in writers.iter_mut().flatten() {
            w.flush()?;
        }

        let records = builder.records();
        let context = builder.finish();
        info!(
            "ingested {records} records from {resource}: {} numeric attribute(s), class values {:?}",
            header.numeric_attributes().count(),
            context.class_values()
        );

        Ok(Ingestion {
            header,
            context,
            work_dir: work_dir.to_path_buf(),
            records,
        })
    }
}

struct RowWriter<'a> {
    header: &'a DatasetHeader,
    writers: &'a mut Vec<Option<BufWriter<File>>>,
    builder: &'a mut ClassIndexBuilder,
    resource: &'a str,
}

impl RowWriter<'_> {
    fn write(&mut self, fields: &[String], line_no: usize) -> Result<(), SliqError> {
        let rid = self.builder.records();
        for (i, field) in fields.iter().enumerate() {
            let Some(w) = self.writers[i].as_mut() else {
                continue;
            };
            if parse_value(field).is_none() {
                return Err(SliqError::parse(
                    self.resource,
                    line_no,
                    format!(
                        "'{field}' is not a number but attribute '{}' is numeric",
                        self.header.attributes()[i].name
                    ),
                ));
            }
            writeln!(w, "{rid} {field}")?;
        }
        self.builder
            .push(&fields[self.header.class_index()])?;
        Ok(())
    }
}

fn check_names(names: &[String]) -> Result<(), SliqError> {
    if names.is_empty() {
        return Err(SliqError::InvalidParameter("header line is empty".into()));
    }
    let mut seen = HashSet::new();
    for name in names {
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(SliqError::InvalidParameter(format!(
                "attribute name '{name}' cannot be used as a file name"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(SliqError::InvalidParameter(format!(
                "attribute '{name}' is declared twice"
            )));
        }
    }
    Ok(())
}

fn check_arity(fields: &[String], expected: usize, resource: &str, line_no: usize) -> Result<(), SliqError> {
    if fields.len() != expected {
        return Err(SliqError::parse(
            resource,
            line_no,
            format!("expected {expected} fields, found {}", fields.len()),
        ));
    }
    Ok(())
}
