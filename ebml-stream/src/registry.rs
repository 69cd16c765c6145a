// ebml-stream
// Copyright (c) 2026 The Project ebml-stream Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `registry` module keeps the process-wide map from DocType names
//! to schemas. Registration happens once during program initialisation;
//! lookups are concurrent reads.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::schema::Schema;

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, Arc<Schema>>> = RwLock::new(HashMap::new());
}

/// Registers `schema` under `doc_type`.
///
/// # Panics
///
/// Panics when the name is already registered; a second registration is
/// a programming error, not a recoverable condition.
pub fn register(doc_type: &str, schema: Schema) {
    let duplicate = {
        let mut map = REGISTRY.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if map.contains_key(doc_type) {
            true
        }
        else {
            map.insert(doc_type.to_string(), Arc::new(schema));
            false
        }
    };
    // The panic fires with the lock released so it cannot poison the
    // registry for the rest of the process.
    if duplicate {
        panic!("ebml: duplicate registration of doc type `{}`", doc_type);
    }
}

/// Looks up the schema registered for `doc_type`.
pub fn definition(doc_type: &str) -> Result<Arc<Schema>> {
    let map = REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    map.get(doc_type).cloned().ok_or_else(|| Error::UnknownDocType(doc_type.to_string()))
}

/// A sorted snapshot of the registered DocType names.
pub fn doc_types() -> Vec<String> {
    let map = REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut names: Vec<String> = map.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::xml;

    fn sample(doc_type: &str) -> Schema {
        let doc = format!(
            r#"<EBMLSchema docType="{}" version="1">
                 <element name="Top" path="\Top" id="0x1A212224" type="master"/>
               </EBMLSchema>"#,
            doc_type
        );
        Schema::new(xml::parse(&doc).unwrap()).unwrap()
    }

    #[test]
    fn register_and_look_up() {
        register("registry-a", sample("registry-a"));
        register("registry-b", sample("registry-b"));

        assert_eq!(definition("registry-a").unwrap().doc_type(), "registry-a");
        assert!(matches!(definition("registry-missing"), Err(Error::UnknownDocType(_))));

        let names = doc_types();
        let a = names.iter().position(|name| name == "registry-a").unwrap();
        let b = names.iter().position(|name| name == "registry-b").unwrap();
        assert!(a < b);
    }

    #[test]
    #[should_panic(expected = "duplicate registration")]
    fn duplicate_registration_panics() {
        register("registry-dup", sample("registry-dup"));
        register("registry-dup", sample("registry-dup"));
    }
}
