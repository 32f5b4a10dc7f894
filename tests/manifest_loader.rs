use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use vfx_blockdesc::loader::{ContentSource, ManifestLoader, parse_manifest};
use vfx_blockdesc::model::ContextType;
use vfx_blockdesc::{BlockDescOptions, BlockFlags, BlockLibrary};

struct MemSource {
    files: BTreeMap<String, String>,
}

impl ContentSource for MemSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        self.files
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not found: {}", path))
    }

    fn list_dir(&mut self, path: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
        let prefix = path.as_str().trim_end_matches('/').to_string() + "/";
        Ok(self
            .files
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .map(|k| Utf8PathBuf::from(k.as_str()))
            .collect())
    }
}

const FORCES: &str = r#"[
  {
    "type_identity": "blocks::forces::Gravity",
    "name": "Gravity",
    "category": "Forces",
    "description": "Apply constant acceleration",
    "source": "\nvelocity += gravity * deltaTime;\n",
    "properties": [{ "name": "gravity", "type": "float3" }],
    "attributes": [{ "name": "velocity", "type": "float3", "writable": true }],
    "compatible_contexts": "UPDATE"
  },
  {
    "type_identity": "blocks::forces::Turbulence",
    "name": "Turbulence",
    "category": "Forces",
    "source": "velocity += RAND3 * intensity * deltaTime;",
    "properties": [{ "name": "intensity", "type": "float" }],
    "compatible_contexts": "UPDATE"
  }
]"#;

const KILL: &str = r#"{
  "type_identity": "blocks::life::KillOld",
  "name": "Kill Old Particles",
  "category": "Life",
  "source": "if (age > lifetime)\n    KILL;",
  "attributes": [
    { "name": "age", "type": "float" },
    { "name": "lifetime", "type": "float" }
  ]
}"#;

fn mem_source() -> MemSource {
    let mut files = BTreeMap::new();
    files.insert("mem://blocks/forces.json".to_string(), FORCES.to_string());
    files.insert("mem://blocks/life/kill.json".to_string(), KILL.to_string());
    files.insert("mem://blocks/broken.json".to_string(), "{ not json".to_string());
    files.insert("mem://blocks/readme.txt".to_string(), "ignored".to_string());
    MemSource { files }
}

#[test]
fn parse_single_and_array_manifests() {
    assert_eq!(parse_manifest(FORCES, None).unwrap().len(), 2);
    let single = parse_manifest(KILL, Some("kill.json")).unwrap();
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].compatible_contexts, ContextType::all());
}

#[test]
fn parse_errors_name_the_origin() {
    let err = parse_manifest("[1, 2]", Some("bad.json")).unwrap_err();
    assert!(format!("{:#}", err).contains("bad.json"));
}

#[test]
fn load_dir_collects_block_types_and_failures() {
    let mut loader = ManifestLoader::new(mem_source());
    let loaded = loader.load_dir("mem://blocks").expect("load dir");

    let ids: Vec<_> = loaded
        .block_types
        .iter()
        .map(|b| b.type_identity.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "blocks::forces::Gravity",
            "blocks::forces::Turbulence",
            "blocks::life::KillOld"
        ]
    );
    assert_eq!(loaded.failures.len(), 1);
    assert_eq!(loaded.failures[0].0.as_str(), "mem://blocks/broken.json");
}

#[test]
fn loaded_manifests_build_a_library() {
    let mut loader = ManifestLoader::new(mem_source());
    let loaded = loader.load_dir("mem://blocks").expect("load dir");
    let mut library = BlockLibrary::new(BlockDescOptions::default());
    assert!(library.extend(&loaded.block_types).is_empty());

    let gravity = library.get("blocks::forces::Gravity").expect("gravity");
    assert_eq!(gravity.source(), "velocity += gravity * deltaTime;");
    assert_eq!(gravity.flags(), BlockFlags::NEEDS_DELTA_TIME);

    let turbulence = library.get("blocks::forces::Turbulence").expect("turbulence");
    assert!(turbulence.is_set(BlockFlags::HAS_RAND | BlockFlags::NEEDS_DELTA_TIME));

    let kill = library.get("blocks::life::KillOld").expect("kill");
    assert_eq!(kill.source(), "if (age > lifetime)\n\t    KILL;");
    assert_eq!(kill.flags(), BlockFlags::HAS_KILL);
    assert_eq!(kill.slot_hash(), 0);

    let update: Vec<_> = library
        .compatible_with(ContextType::UPDATE)
        .map(|d| d.function_name())
        .collect();
    assert_eq!(update, vec!["Gravity", "Turbulence", "KillOld"]);
    let output: Vec<_> = library
        .compatible_with(ContextType::OUTPUT)
        .map(|d| d.function_name())
        .collect();
    assert_eq!(output, vec!["KillOld"]);

    let found: Vec<_> = library.search("acceleration").map(|d| d.id()).collect();
    assert_eq!(found, vec!["blocks::forces::Gravity"]);
}

#[test]
fn options_load_from_json() {
    let mut files = BTreeMap::new();
    files.insert(
        "mem://options.json".to_string(),
        r#"{ "use_collision_safe_names": true }"#.to_string(),
    );
    files.insert("mem://empty.json".to_string(), "{}".to_string());
    let mut loader = ManifestLoader::new(MemSource { files });

    let options = loader.load_options("mem://options.json").unwrap();
    assert!(options.use_collision_safe_names);
    assert_eq!(loader.load_options("mem://empty.json").unwrap(), BlockDescOptions::default());
    assert!(loader.load_options("mem://missing.json").is_err());
}
