use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ixcheck::EntitySize;

const MINIMAL_FILING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns:ix="http://www.xbrl.org/2013/inlineXBRL"
      xmlns:xbrli="http://www.xbrl.org/2003/instance"
      xmlns:link="http://www.xbrl.org/2003/linkbase"
      xmlns:xlink="http://www.w3.org/1999/xlink"
      xmlns:iso4217="http://www.xbrl.org/2003/iso4217">
  <body>
    <ix:header>
      <link:schemaRef xlink:href="https://xbrl.frc.org.uk/FRS-102/2023-01-01/FRS-102-2023-01-01.xsd"/>
      <xbrli:context id="period-2023">
        <xbrli:entity>
          <xbrli:identifier scheme="http://www.companieshouse.gov.uk/">01234567</xbrli:identifier>
        </xbrli:entity>
        <xbrli:period>
          <xbrli:startDate>2023-01-01</xbrli:startDate>
          <xbrli:endDate>2023-12-31</xbrli:endDate>
        </xbrli:period>
      </xbrli:context>
      <xbrli:unit id="gbp"><xbrli:measure>iso4217:GBP</xbrli:measure></xbrli:unit>
      <xbrli:unit id="pure"><xbrli:measure>xbrli:pure</xbrli:measure></xbrli:unit>
    </ix:header>
    <p><ix:nonFraction name="uk-core:TurnoverRevenue" contextRef="period-2023" unitRef="gbp" decimals="0">52,400</ix:nonFraction></p>
    <p><ix:nonFraction name="uk-core:AverageNumberEmployeesDuringPeriod" contextRef="period-2023" unitRef="pure" decimals="0">4</ix:nonFraction></p>
  </body>
</html>"#;

fn parse_minimal(c: &mut Criterion) {
    c.bench_function("parse_minimal", |b| {
        b.iter(|| ixcheck::parse(black_box(MINIMAL_FILING)));
    });
}

fn validate_minimal(c: &mut Criterion) {
    c.bench_function("validate_minimal", |b| {
        b.iter(|| ixcheck::validate(black_box(MINIMAL_FILING), EntitySize::Micro));
    });
}

fn validate_many_facts(c: &mut Criterion) {
    // Grow the fact table to a size closer to a real set of accounts.
    let facts: String = (0..500)
        .map(|i| {
            format!(
                r#"<p><ix:nonFraction name="uk-core:Line{i}" contextRef="period-2023" unitRef="gbp" decimals="0">{i},000</ix:nonFraction></p>"#
            )
        })
        .collect();
    let filing = MINIMAL_FILING.replace("</body>", &format!("{facts}</body>"));

    c.bench_function("validate_500_facts", |b| {
        b.iter(|| ixcheck::validate(black_box(&filing), EntitySize::Micro));
    });
}

criterion_group!(benches, parse_minimal, validate_minimal, validate_many_facts);
criterion_main!(benches);
