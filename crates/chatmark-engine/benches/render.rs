use std::hint::black_box;

use chatmark_engine::render_markdown;
use criterion::{Criterion, criterion_group, criterion_main};

fn mixed_document(paragraphs: usize) -> String {
    let mut doc = String::from("# Отчёт\n\n");
    for i in 0..paragraphs {
        doc.push_str(&format!(
            "## Раздел {i}\n\nТекст с **акцентом**, `кодом` и [ссылкой](https://example.ru/{i}).\n\n\
             ```bsl\nПроцедура Обработать{i}()\n\tДанные = Новый Массив;\n\tДанные.Добавить({i});\nКонецПроцедуры\n```\n\n\
             ```mermaid\nA{i}[Шаг(вход)] --> B{i}{{x<={i}}}\n```\n\n\
             | поле | значение |\n|---|---|\n| н{i} | {i} |\n\n"
        ));
    }
    doc
}

fn bench_render(c: &mut Criterion) {
    let small = mixed_document(2);
    let large = mixed_document(50);

    c.bench_function("render_small", |b| {
        b.iter(|| render_markdown(black_box(&small)))
    });
    c.bench_function("render_large", |b| {
        b.iter(|| render_markdown(black_box(&large)))
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
