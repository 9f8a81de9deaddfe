use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plain_factory::{FactorySettings, LicenseContent, LicenseMetadata};

const LICENSE_YAML: &str = r#"
plain_name: MIT License
spdx_id: MIT
plain_version: 0.2.1
original_name: MIT License
original_organization: Open Source Initiative
original_url: https://opensource.org/license/mit
original_license_text: Permission is hereby granted, free of charge.
interpretation_text: The MIT License is **short**.
reader_license_text: |
  ## You Can Do What You Want

  You can use(1) this work, copy(2) it and share(3) it however you want.
  { .annotate }
  1. That includes selling it.
  2. As many times as you like.
  3. With anyone.

  `Work`
  :   The thing you received under this license.

  ## If You Share It

  You must give credit[^1] to the authors.

  [^1]: Keep the copyright notice.

  !!! warning "No Warranty"
      We give no warranty of any kind.
"#;

fn bench_assembly(c: &mut Criterion) {
    let meta = LicenseMetadata::from_yaml_str(LICENSE_YAML).unwrap();

    c.bench_function("Assemble page (MIT)", |b| {
        b.iter(|| {
            let license =
                LicenseContent::with_year(black_box(meta.clone()), FactorySettings::default(), 2025)
                    .unwrap();
            black_box(license.license_content().len());
        })
    });

    c.bench_function("Plaintext export (MIT)", |b| {
        b.iter(|| {
            let license =
                LicenseContent::with_year(black_box(meta.clone()), FactorySettings::default(), 2025)
                    .unwrap();
            black_box(license.plaintext_content());
        })
    });
}

criterion_group!(benches, bench_assembly);
criterion_main!(benches);
