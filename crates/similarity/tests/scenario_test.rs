//! End-to-end behaviour of fit, recommend and persistence.

use data_loader::{Item, ItemTable};
use pipeline::TagCorpus;
use similarity::{
    recommend, ArtifactStore, DenseCosineIndex, IndexConfig, IndexError, SimilarityIndex,
};
use tempfile::tempdir;

fn catalog(rows: &[(u32, &str, &str)]) -> (ItemTable, TagCorpus) {
    let items = rows
        .iter()
        .map(|&(movie_id, title, _)| Item {
            movie_id,
            title: title.to_string(),
        })
        .collect();
    let corpus = rows
        .iter()
        .map(|&(_, _, tags)| tags.split_whitespace().map(str::to_string).collect::<Vec<String>>())
        .collect();
    (items, corpus)
}

fn abc() -> (ItemTable, TagCorpus) {
    catalog(&[
        (1, "A", "space adventure"),
        (2, "B", "space war"),
        (3, "C", "romance drama"),
    ])
}

#[test]
fn test_three_item_scenario() {
    let (items, corpus) = abc();
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    let terms: Vec<&str> = index.vocabulary().terms().iter().map(String::as_str).collect();
    assert_eq!(terms, vec!["adventure", "drama", "romance", "space", "war"]);

    let dense: Vec<Vec<u32>> = corpus
        .documents()
        .iter()
        .map(|d| index.vocabulary().encode(d).to_dense())
        .collect();
    assert_eq!(dense[0], vec![1, 0, 0, 1, 0]);
    assert_eq!(dense[1], vec![0, 0, 0, 1, 1]);
    assert_eq!(dense[2], vec![0, 1, 1, 0, 0]);

    assert!((index.score(0, 1).unwrap() - 0.5).abs() < 1e-6);
    assert_eq!(index.score(0, 2), Some(0.0));
    assert_eq!(index.score(1, 2), Some(0.0));

    let recs = recommend("A", &items, &index, 2).unwrap();
    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C"]);
    assert_eq!(recs[0].movie_id, 2);
}

#[test]
fn test_query_never_returned_and_count_capped() {
    let (items, corpus) = abc();
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    let recs = recommend("B", &items, &index, 10).unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.title != "B"));
}

#[test]
fn test_duplicate_content_still_excludes_query() {
    let (items, corpus) = catalog(&[
        (1, "Original", "heist crew vault"),
        (2, "Remake", "heist crew vault"),
        (3, "Other", "heist"),
    ]);
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    let recs = recommend("Remake", &items, &index, 5).unwrap();
    assert_eq!(recs[0].title, "Original");
    assert_eq!(recs[0].score, 1.0);
    assert_eq!(recs.len(), 2);
}

#[test]
fn test_unknown_title() {
    let (items, corpus) = abc();
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    let err = recommend("a", &items, &index, 5).unwrap_err();
    assert!(matches!(err, IndexError::NotFound { ref title } if title == "a"));
}

#[test]
fn test_stop_word_only_item_scores_zero() {
    let (items, corpus) = catalog(&[
        (1, "A", "space adventure"),
        (2, "Empty", "the and of"),
    ]);
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    assert_eq!(index.score(1, 1), Some(0.0));
    let recs = recommend("Empty", &items, &index, 5).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].score, 0.0);
    assert!(!recs[0].score.is_nan());
}

#[test]
fn test_matrix_properties() {
    let (_, corpus) = catalog(&[
        (1, "A", "space adventure alien alien"),
        (2, "B", "space drama family"),
        (3, "C", "romance family paris"),
        (4, "D", "alien invasion space space"),
        (5, "E", "the"),
    ]);
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    for i in 0..index.len() {
        for j in 0..index.len() {
            let value = index.score(i, j).unwrap();
            assert_eq!(value, index.score(j, i).unwrap());
            assert!((0.0..=1.0).contains(&value));
        }
    }
    for i in 0..4 {
        assert_eq!(index.score(i, i), Some(1.0));
    }
}

#[test]
fn test_refit_is_identical() {
    let (_, corpus) = abc();
    let config = IndexConfig::default().with_max_features(3);
    let first = DenseCosineIndex::fit(&corpus, &config).unwrap();
    let second = DenseCosineIndex::fit(&corpus, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.vocabulary().len(), 3);
}

#[test]
fn test_persisted_index_answers_the_same() {
    let dir = tempdir().unwrap();
    let (items, corpus) = abc();
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();

    let store = ArtifactStore::new(dir.path());
    store.save(&items, &index).unwrap();
    let (loaded_items, loaded_index) = store.load().unwrap();

    assert_eq!(
        recommend("A", &items, &index, 5).unwrap(),
        recommend("A", &loaded_items, &loaded_index, 5).unwrap()
    );
}

#[test]
fn test_resave_replaces_artifacts() {
    let dir = tempdir().unwrap();
    let store = ArtifactStore::new(dir.path());

    let (items, corpus) = abc();
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();
    store.save(&items, &index).unwrap();

    let (items, corpus) = catalog(&[(7, "X", "noir"), (8, "Y", "noir detective")]);
    let index = DenseCosineIndex::fit(&corpus, &IndexConfig::default()).unwrap();
    store.save(&items, &index).unwrap();

    let (loaded_items, _) = store.load().unwrap();
    assert_eq!(loaded_items.len(), 2);
    assert_eq!(loaded_items.position("X"), Some(0));
}
