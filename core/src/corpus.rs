use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{Document, Label, Result};

/// Load labeled messages from one CSV file or from every `.csv` file under a directory.
///
/// Directory inputs are read in path order so the document order, and with it
/// vocabulary order, is the same on every run.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let input_path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("csv") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else {
        files.push(input_path.to_path_buf());
    }

    let mut documents = Vec::new();
    for file in files {
        let f = File::open(&file)?;
        let mut docs = from_reader(f)?;
        tracing::debug!(file = %file.display(), documents = docs.len(), "read corpus file");
        documents.append(&mut docs);
    }
    tracing::info!(documents = documents.len(), "corpus loaded");
    Ok(documents)
}

/// Parse headerless `label,text[,...]` rows. Column 0 must be exactly `spam` or `ham`;
/// every other row, including ones the CSV parser rejects, is skipped.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Document>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(reader);
    let mut documents = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.byte_records() {
        let record = match record {
            Ok(r) => r,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparsable row");
                skipped += 1;
                continue;
            }
        };
        let (Some(raw_label), Some(raw_text)) = (record.get(0), record.get(1)) else {
            skipped += 1;
            continue;
        };
        let label = String::from_utf8_lossy(raw_label);
        match Label::parse(label.trim_start_matches('\u{feff}')) {
            Some(label) => documents.push(Document::new(label, String::from_utf8_lossy(raw_text))),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "dropped rows without a spam/ham label");
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_labeled_rows() {
        let data = "v1,v2,,,\nham,Go until jurong point,,,\nspam,\"Free entry, text WIN\",,,\nunknown,skip me\nham\nspam,Last one\n";
        let docs = from_reader(data.as_bytes()).unwrap();
        assert_eq!(
            docs,
            vec![
                Document::new(Label::Ham, "Go until jurong point"),
                Document::new(Label::Spam, "Free entry, text WIN"),
                Document::new(Label::Spam, "Last one"),
            ]
        );
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let mut data = b"ham,caf".to_vec();
        data.push(0xe9);
        data.extend_from_slice(b" ok\n");
        let docs = from_reader(data.as_slice()).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].text.starts_with("caf"));
        assert!(docs[0].text.ends_with(" ok"));
    }

    #[test]
    fn byte_order_mark_does_not_hide_first_label() {
        let docs = from_reader("\u{feff}spam,hello\n".as_bytes()).unwrap();
        assert_eq!(docs, vec![Document::new(Label::Spam, "hello")]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load("/definitely/not/here.csv").is_err());
    }
}
