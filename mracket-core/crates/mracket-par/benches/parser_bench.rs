use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mracket_lex::Lexer;
use mracket_par::{parse, stringify};

const SAMPLE: &str = r#"
#lang racket
(define (fact n)
  (if (= n 0)
      1
      (* n (fact (- n 1)))))
(define (sum-to n)
  (local ((define (go i acc)
            (if (> i n) acc (go (+ i 1) (+ acc i)))))
    (go 0 0)))
(check-expect (fact 5) 120)
(check-expect (sum-to 10) 55)
"#;

fn bench_parse_and_stringify(c: &mut Criterion) {
    c.bench_function("parse+stringify sample program", |b| {
        b.iter(|| {
            let tokens = Lexer::tokenize(black_box(SAMPLE)).unwrap();
            let ast = parse(tokens).unwrap();
            black_box(stringify(&ast))
        })
    });
}

criterion_group!(benches, bench_parse_and_stringify);
criterion_main!(benches);
