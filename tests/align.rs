use verse_align::{RecognizedWord, Verse, VerseTiming, align, align_with_report, normalize};

fn word(text: &str, start: f64, end: f64) -> RecognizedWord {
    RecognizedWord {
        text: text.to_owned(),
        start_seconds: start,
        end_seconds: end,
    }
}

/// Words of irregular length so boundaries are distinguishable.
fn spoken_words(count: usize) -> Vec<RecognizedWord> {
    let mut t = 0.0;
    (0..count)
        .map(|i| {
            let len = 0.15 + (i % 4) as f64 * 0.1;
            let w = word(&format!("w{i}"), t, t + len);
            t += len + 0.05;
            w
        })
        .collect()
}

fn genesis_one() -> Vec<Verse> {
    vec![
        Verse::new(1, "In the beginning God created heaven, and earth."),
        Verse::new(
            2,
            "And the earth was void and empty, and darkness was upon the face of the deep; \
             and the spirit of God moved over the waters.",
        ),
        Verse::new(3, "And God said: Be light made. And light was made."),
        Verse::new(4, "And God saw the light that it was good; and he divided the light from the darkness."),
        Verse::new(5, "And he called the light Day, and the darkness Night; and there was evening and morning one day."),
    ]
}

#[test]
fn single_verse_covers_the_transcript() {
    let verses = vec![Verse::new(1, "In the beginning")];
    let words = vec![
        word("In", 0.0, 0.2),
        word("the", 0.2, 0.4),
        word("beginning", 0.4, 0.9),
    ];

    assert_eq!(
        align(&verses, &words),
        vec![VerseTiming {
            verse: 1,
            start: 0.0,
            end: 0.9,
        }]
    );
}

#[test]
fn short_transcript_clamps_to_last_word() {
    let verses = vec![Verse::new(1, "Hello world"), Verse::new(2, "Goodbye")];
    let words = vec![word("Hello", 0.0, 1.0), word("world", 1.0, 2.0)];

    assert_eq!(
        align(&verses, &words),
        vec![
            VerseTiming {
                verse: 1,
                start: 0.0,
                end: 2.0,
            },
            VerseTiming {
                verse: 2,
                start: 1.0,
                end: 2.0,
            },
        ]
    );
}

#[test]
fn punctuation_only_verse_produces_nothing() {
    let verses = vec![Verse::new(1, "...")];
    let words = vec![word("amen", 0.0, 0.5)];
    assert!(align(&verses, &words).is_empty());
}

#[test]
fn empty_transcript_produces_nothing() {
    assert!(align(&genesis_one(), &[]).is_empty());
}

#[test]
fn alignment_is_deterministic() -> anyhow::Result<()> {
    let verses = genesis_one();
    let words = spoken_words(60);

    let first = serde_json::to_string(&align(&verses, &words))?;
    let second = serde_json::to_string(&align(&verses, &words))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn starts_never_decrease() {
    let verses = genesis_one();
    for count in [1, 5, 17, 40, 73, 200] {
        let timings = align(&verses, &spoken_words(count));
        for pair in timings.windows(2) {
            assert!(
                pair[0].start <= pair[1].start,
                "{count} words: {:?} then {:?}",
                pair[0],
                pair[1]
            );
            assert!(pair[0].end <= pair[1].end);
        }
        for timing in &timings {
            assert!(timing.start <= timing.end);
        }
    }
}

#[test]
fn output_never_exceeds_verse_count() {
    let mut verses = genesis_one();
    verses.insert(2, Verse::new(99, "-- ; --"));

    for count in [1, 3, 30, 300] {
        let report = align_with_report(&verses, &spoken_words(count));
        assert_eq!(report.timings.len(), verses.len() - 1);
        assert_eq!(report.skipped_empty, vec![99]);
    }
}

#[test]
fn overlong_text_ends_on_final_word() {
    let verses = genesis_one();
    let total_words: usize = verses.iter().map(|v| normalize(&v.text).len()).sum();
    let words = spoken_words(total_words / 2);
    let final_end = (words[words.len() - 1].end_seconds * 100.0).round() / 100.0;

    let report = align_with_report(&verses, &words);
    let last = report.timings.last().expect("at least one timing");
    assert_eq!(last.end, final_end);
    assert!(report.is_saturated());
}

#[test]
fn ample_transcript_is_not_saturated() {
    let verses = genesis_one();
    let total_words: usize = verses.iter().map(|v| normalize(&v.text).len()).sum();

    let report = align_with_report(&verses, &spoken_words(total_words + 10));
    assert_eq!(report.timings.len(), verses.len());
    assert!(report.collapsed.is_empty());
}

#[test]
fn drift_shifts_later_boundaries_only() {
    let verses = vec![
        Verse::new(1, "a b c"),
        Verse::new(2, "d e f"),
        Verse::new(3, "g h i"),
    ];
    let words = spoken_words(30);

    let baseline = align(&verses, &words);

    // An extra word in verse 2's text pushes verse 3 one word later, but leaves verse 1 alone.
    let mut drifted_verses = verses.clone();
    drifted_verses[1].text = "d e f extra".to_owned();
    let drifted = align(&drifted_verses, &words);

    assert_eq!(drifted[0], baseline[0]);
    assert_eq!(drifted[1].start, baseline[1].start);
    assert!(drifted[1].end > baseline[1].end);
    assert!(drifted[2].start > baseline[2].start);
}
