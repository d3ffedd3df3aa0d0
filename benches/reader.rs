use divan::{Bencher, black_box};
use treebank::{ReadOptions, SentenceReader, is_projective};

fn main() {
    divan::main();
}

/// Synthetic corpus: `n` copies of a short annotated sentence.
fn corpus(n: usize) -> String {
    let sentence = "# sent_id = s\n\
        1\tLe\tle\tDET\tD\t_\t2\tdet\t_\t_\n\
        2\tchat\tchat\tNOUN\tNC\tGender=Masc|Number=Sing\t3\tnsubj\t_\t_\n\
        3\tdort\tdormir\tVERB\tV\t_\t0\troot\t_\t_\n\
        4\tprofondement\tprofondement\tADV\tADV\t_\t3\tadvmod\t_\t_\n\n";
    sentence.repeat(n)
}

#[divan::bench]
fn read_1k_sentences(bencher: Bencher) {
    let text = corpus(1000);
    bencher.bench_local(|| {
        let reader = SentenceReader::from_string(black_box(&text), ReadOptions::default());
        for result in reader {
            black_box(result.unwrap());
        }
    });
}

#[divan::bench]
fn projectivity_40_tokens(bencher: Bencher) {
    // Left-branching chain with a root attachment in the middle.
    let n = 40;
    let mut heads = vec![None];
    heads.extend((1..=n).map(|i| if i == n / 2 { Some(n + 1) } else { Some(i + 1) }));
    heads.push(None);

    bencher.bench_local(|| is_projective(black_box(&heads), true));
}
