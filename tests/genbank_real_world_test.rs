//! Integration tests for the GenBank parser
//!
//! Fixtures live in tests/data/genbank/:
//! - puc19_lacz.gb: pUC19 lacZ alpha region, in canonical writer layout
//! - multi_record.gb: three hand-written records (plasmid, CONTIG assembly,
//!   partial RNA) exercising continuation lines and bare qualifiers

use seqmetal::formats::genbank::{
    self, ErrorKind, GenbankError, GenbankParser, ParserConfig, Section,
};
use seqmetal::io::DataSource;
use seqmetal::SeqmetalError;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

const LACZ_ALPHA: &str = "MTMITPSLHACRSTLEDPRVPSSNSLAVVLQRRDWENPGVTQLNRLAAHPPFASWRNSEEARTDRPSQQLRSLNGEWRLMRYFLLTHLCGISHRIWCTLSTICSDAA";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from("tests/data/genbank").join(name)
}

#[test]
fn test_puc19_metadata() {
    let record = genbank::read(fixture("puc19_lacz.gb")).expect("Failed to parse pUC19 record");
    let meta = &record.meta;

    assert_eq!(meta.locus.name, "pUC19_lacZ");
    assert_eq!(meta.locus.sequence_length, 336);
    assert_eq!(meta.locus.molecule_type, "DNA");
    assert_eq!(meta.locus.genbank_division, "UNA");
    assert_eq!(meta.locus.modification_date, "12-SEP-2023");
    assert!(!meta.locus.circular, "pUC19_lacZ is linear");

    assert_eq!(
        meta.definition,
        "lacZ alpha fragment of the cloning vector pUC19, with the multiple cloning site."
    );
    assert_eq!(meta.version, "pUC19_lacZ.1");
    assert_eq!(meta.organism, "synthetic DNA construct");
    assert_eq!(
        meta.taxonomy,
        ["other sequences", "artificial sequences", "vectors"]
    );

    assert_eq!(meta.references.len(), 2);
    assert_eq!(meta.references[0].pubmed, "2985470");
    assert_eq!(meta.references[0].range, "(bases 1 to 336)");
    assert_eq!(
        meta.references[0].title,
        "Improved M13 phage cloning vectors and host strains: nucleotide sequences of the M13mp18 and pUC19 vectors"
    );

    let counts: Vec<(&str, u64)> = meta
        .base_count
        .iter()
        .map(|count| (count.base.as_str(), count.count))
        .collect();
    assert_eq!(counts, [("a", 65), ("c", 110), ("g", 107), ("t", 54)]);
    assert_eq!(record.sequence().len(), 336);
}

#[test]
fn test_puc19_features() {
    let record = genbank::read(fixture("puc19_lacz.gb")).expect("Failed to parse pUC19 record");
    assert_eq!(record.features.len(), 5);

    let cds = &record.features[2];
    assert_eq!(cds.feature_type, "CDS");
    assert_eq!(cds.attributes["translation"], [LACZ_ALPHA.to_string()]);
    assert_eq!(cds.attributes.first("codon_start"), Some("1"));
    assert_eq!((cds.location().start, cds.location().end), (12, 336));

    let cds_sequence = record.feature_sequence(2).unwrap();
    assert_eq!(cds_sequence.len(), 3 * (LACZ_ALPHA.len() + 1));
    assert!(cds_sequence.starts_with("atgacc"));
    assert!(cds_sequence.ends_with("taa"));

    let primer = &record.features[1];
    assert!(primer.location().complement);
    assert!(primer.location().five_prime_partial);
    assert_eq!(record.feature_sequence(1).unwrap(), "tcgccttgcagc");

    let split = &record.features[3];
    assert!(split.location().join);
    assert_eq!(split.attributes["pseudo"], [String::new()]);
    assert_eq!(
        record.feature_sequence(3).unwrap(),
        "atgaccatgattaccccgagcctgcatgcgtgccgcagcaccctggaactgcagcgccgcgattgggaaaacccgggcgtgacccagctgaaccgcctg"
    );

    let reverse = &record.features[4];
    assert_eq!(
        reverse.attributes["note"],
        ["reverse strand region".to_string(), "second note".to_string()]
    );
    assert_eq!(
        record.feature_sequence(4).unwrap(),
        "ttacgccgcatcgctgcaaatggtgctcagggtgcactcaggcgccattcgccgttcaggctgcgcagctgctggctcgggcgatcgg"
    );
}

#[test]
fn test_multi_record_file() {
    let records = genbank::read_multi(fixture("multi_record.gb")).expect("Failed to parse records");
    let names: Vec<&str> = records.iter().map(|record| record.name()).collect();
    assert_eq!(names, ["SYNPLAS1", "SYNASM1", "SYNRNA1"]);

    let plasmid = &records[0];
    assert!(plasmid.meta.locus.circular);
    assert_eq!(plasmid.sequence().len(), 120);
    assert_eq!(
        plasmid.meta.other.keys().map(String::as_str).collect::<Vec<_>>(),
        ["DBLINK", "COMMENT"]
    );
    assert_eq!(
        plasmid.meta.other["COMMENT"],
        "Hand-written record exercising continuation lines."
    );

    let assembly = &records[1];
    assert_eq!(assembly.meta.locus.genbank_division, "CON");
    assert!(assembly.sequence().is_empty());
    assert_eq!(
        assembly.meta.contig.as_deref(),
        Some("join(SYNPART1.1:1..1000,gap(100),SYNPART2.1:1..900)")
    );

    let rna = &records[2];
    assert_eq!(rna.meta.locus.molecule_type, "ss-RNA");
    assert_eq!(rna.meta.locus.genbank_division, "VRL");
    assert!(rna.meta.taxonomy.is_empty());
    let partial = rna.features[0].location();
    assert!(partial.five_prime_partial && partial.three_prime_partial);
    assert_eq!(partial.render(), "<1..24>");
}

#[test]
fn test_wrapped_reference_fields_merge() {
    let records = genbank::read_multi(fixture("multi_record.gb")).unwrap();
    let references = &records[0].meta.references;

    assert_eq!(references.len(), 2);
    assert_eq!(
        references[0].authors,
        "Alvarez,M., Brandt,K., Chen,L., Dubois,P., Eriksen,T., Fujita,H., Garcia,R. and Hoffmann,S."
    );
    assert_eq!(
        references[1].authors,
        "Ivanova,N., Jensen,O., Kowalski,P., Larsen,Q., Moreau,R., Nakamura,S., Olsen,T., Petrov,U. and Quinn,V."
    );
    assert_eq!(references[1].consortium, "Test Sequencing Consortium");
    assert_eq!(references[1].remark, "Sequence verified by two methods.");
}

#[test]
fn test_continuation_shapes() {
    let records = genbank::read_multi(fixture("multi_record.gb")).unwrap();
    let plasmid = &records[0];

    let gene = &plasmid.features[1];
    assert_eq!(gene.location().raw.as_deref(), Some("join(1..9,21..29,41..50)"));
    assert_eq!(gene.attributes["pseudo"], [String::new()]);
    assert_eq!(plasmid.feature_sequence(1).unwrap(), "atggctagcaaagggcatggctataggc");

    let cds = &plasmid.features[2];
    assert_eq!(cds.attributes.first("codon_start"), Some("1"));
    // Fragments are concatenated without inserted whitespace
    assert_eq!(cds.attributes.first("note"), Some("spans threeexons"));
    assert_eq!(cds.attributes.first("translation"), Some("MASKLGHIVT"));

    assert_eq!(
        plasmid.feature_sequence(3).unwrap(),
        "gctagctagctagcatgcatgcatcgatgctagctagctagctagcatcgatcgatcgta"
    );
}

#[test]
fn test_parse_from_memory_source() {
    let bytes = fs::read(fixture("puc19_lacz.gb")).unwrap();
    let mut parser = GenbankParser::from_source(DataSource::from_bytes(bytes)).unwrap();
    let record = parser.next_record().unwrap().unwrap();
    assert_eq!(record.name(), "pUC19_lacZ");
    assert!(parser.next_record().unwrap().is_none());
}

#[test]
fn test_truncated_file_reports_section_and_file() {
    let text = fs::read_to_string(fixture("puc19_lacz.gb")).unwrap();
    let cut = text.find("BASE COUNT").unwrap();

    let config = ParserConfig::new().with_file_name("puc19_cut.gb");
    let mut parser = GenbankParser::with_config(Cursor::new(&text[..cut]), config);
    let err = parser.next_record().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Truncation);
    assert!(matches!(
        err,
        GenbankError::Truncated {
            section: Section::Features,
            ..
        }
    ));
    assert!(err.to_string().starts_with("puc19_cut.gb:"));
}

#[test]
fn test_bad_location_is_structural() {
    let text = fs::read_to_string(fixture("puc19_lacz.gb"))
        .unwrap()
        .replace("join(13..60,100..150)", "order(13..60,100..150)");
    let err = genbank::parse(Cursor::new(text)).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Structural);
    match err {
        SeqmetalError::Genbank(GenbankError::InvalidLocation { at, location, .. }) => {
            assert_eq!(location, "order(13..60,100..150)");
            assert!(at.text.contains("gene"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_file_is_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.gb");
    fs::write(&path, "").unwrap();

    let err = genbank::read(&path).unwrap_err();
    assert!(matches!(err, SeqmetalError::EmptyInput { .. }));
    assert!(genbank::read_multi(&path).unwrap().is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = genbank::read("tests/data/genbank/does_not_exist.gb").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_sequence_edits_refresh_feature_sequences() {
    let mut record = genbank::read(fixture("puc19_lacz.gb")).unwrap();
    let original = record.feature_sequence(1).unwrap().to_string();
    assert_eq!(original.len(), 12);

    record.set_sequence("a".repeat(336));
    assert_eq!(record.sequence().len(), 336);
    assert_eq!(record.feature_sequence(1).unwrap(), "tttttttttttt");
    assert_ne!(record.feature_sequence(1).unwrap(), original);
}
