use spamfilter_core::corpus;
use spamfilter_core::pipeline::{run, ClassifierKind, PipelineConfig, VocabularyScope};
use spamfilter_core::Label;
use std::fs;
use tempfile::tempdir;

const CORPUS: &str = "\
v1,v2,,,
ham,\"Go until jurong point, crazy.. Available only in bugis n great world la e buffet...\",,,
ham,Ok lar... Joking wif u oni...,,,
spam,Free entry in 2 a wkly comp to win FA Cup final tkts 21st May 2005. Text FA to 87121,,,
ham,U dun say so early hor... U c already then say...,,,
ham,\"Nah I don't think he goes to usf, he lives around here though\",,,
spam,\"WINNER!! As a valued network customer you have been selected to receive a $900 prize reward! Call 09061701461\",,,
ham,Even my brother is not like to speak with me. They treat me like aids patent.,,,
spam,Had your mobile 11 months or more? U R entitled to Update to the latest colour mobiles with camera for Free! Call 08002986030,,,
ham,I'm gonna be home soon and i don't want to talk about this stuff anymore tonight,,,
spam,\"SIX chances to win CASH! From 100 to 20,000 pounds txt> CSH11 and send to 87575. Visit www.cash-win.com\",,,
";

fn config() -> PipelineConfig {
    PipelineConfig { test_size: 2, threshold: 0, ..PipelineConfig::default() }
}

#[test]
fn ten_message_corpus_scores_reproducibly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spam.csv");
    fs::write(&path, CORPUS).unwrap();

    let docs = corpus::load(&path).unwrap();
    assert_eq!(docs.len(), 10);
    assert_eq!(docs.iter().filter(|d| d.label == Label::Ham).count(), 6);
    assert_eq!(docs.iter().filter(|d| d.label == Label::Spam).count(), 4);

    for scope in [VocabularyScope::Training, VocabularyScope::Corpus] {
        for classifier in [ClassifierKind::svm(), ClassifierKind::bayes()] {
            let cfg = PipelineConfig { vocabulary_scope: scope, classifier, ..config() };
            let first = run(docs.clone(), &cfg).unwrap();
            let second = run(docs.clone(), &cfg).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.train_size, 8);
            assert_eq!(first.test_size, 2);
            assert!((0.0..=100.0).contains(&first.accuracy));
            assert!(first.vocabulary_size > 0);
        }
    }
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let docs = corpus::from_reader(CORPUS.as_bytes()).unwrap();
    let cfg = PipelineConfig { shuffle_seed: Some(11), ..config() };
    assert_eq!(run(docs.clone(), &cfg).unwrap(), run(docs, &cfg).unwrap());
}

#[test]
fn directory_input_reads_every_csv() {
    let dir = tempdir().unwrap();
    let (a, b) = CORPUS.split_at(CORPUS.find("spam,\"WINNER").unwrap());
    fs::write(dir.path().join("a.csv"), a).unwrap();
    fs::create_dir(dir.path().join("more")).unwrap();
    fs::write(dir.path().join("more").join("b.csv"), b).unwrap();
    fs::write(dir.path().join("notes.txt"), "spam,not a corpus file\n").unwrap();

    let docs = corpus::load(dir.path()).unwrap();
    assert_eq!(docs.len(), 10);
    assert_eq!(docs, corpus::from_reader(CORPUS.as_bytes()).unwrap());
}
