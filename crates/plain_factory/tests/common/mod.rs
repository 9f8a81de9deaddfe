/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use plain_factory::{FactorySettings, LicenseContent, LicenseMetadata};

pub const YEAR: i32 = 2025;

/// A license with an official original, an interpretation and an outro.
pub const MIT_YAML: &str = r#"
plain_name: MIT License
spdx_id: MIT
plain_version: 0.2.1
category: permissive
original_name: MIT License
original_version: "1.0"
original_organization: Open Source Initiative
original_url: https://opensource.org/license/mit
official_link: "[official MIT License](https://opensource.org/license/mit)"
permissions: [commercial-use, distribution, modifications, private-use]
conditions: [include-copyright]
limitations: [liability, warranty]
interpretation_title: "Understanding {{ plain_name | trim }}"
interpretation_text: |
  The MIT License is **short**. We kept it that way.
outro: Thanks for reading.
reader_license_text: |
  ## You Can Do What You Want

  Copyright {{ year }}. You can use(1) this work **however** you want.
  { .annotate }
  1. That includes selling it.

  `Work`
  :   The thing you received under this license.

  ```sh
  echo **not bold**
  ```
original_license_text: |
  Copyright (c) {{ year }}

  Permission is hereby granted, free of charge.
"#;

/// A dedication with no official original.
pub const UNLICENSE_YAML: &str = r#"
plain_name: Unlicense
spdx_id: Unlicense
category: public-domain
reader_license_text: |
  We give up our rights(1) to this work.
  { .annotate }
  1. All of them.

  Do what you like.
interpretation_text: Never shown without an official text.
"#;

pub fn meta(yaml: &str) -> LicenseMetadata {
    LicenseMetadata::from_yaml_str(yaml).unwrap()
}

pub fn license(yaml: &str) -> LicenseContent {
    LicenseContent::with_year(meta(yaml), FactorySettings::default(), YEAR).unwrap()
}

pub fn mit() -> LicenseContent {
    license(MIT_YAML)
}

pub fn unlicense() -> LicenseContent {
    license(UNLICENSE_YAML)
}
