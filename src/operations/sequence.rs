//! Nucleotide complement operations
//!
//! Feature locations on the minus strand are read through the reverse
//! complement of the record sequence. Both functions work on ASCII bytes and
//! preserve case, so the lowercase sequence text found in GenBank files comes
//! back lowercase.
//!
//! # Examples
//!
//! ```
//! use seqmetal::operations::{complement, reverse_complement};
//!
//! let seq = b"ATGC";
//! assert_eq!(reverse_complement(seq), b"GCAT");
//! assert_eq!(complement(seq), b"TACG");
//!
//! // GenBank sequence text is lowercase
//! assert_eq!(reverse_complement(b"atggct"), b"agccat");
//! ```

/// Lookup table for DNA/RNA complement
///
/// Handles:
/// - Standard bases: A↔T/U, G↔C
/// - Every IUPAC ambiguity code, mapped to the code for the complementary set
/// - Anything else (gaps, `*`, digits) preserved as-is
///
/// # IUPAC Nucleotide Codes
///
/// - R (A or G) ↔ Y (C or T)
/// - K (G or T) ↔ M (A or C)
/// - B (not A) ↔ V (not T)
/// - D (not C) ↔ H (not G)
/// - W (A or T), S (G or C) and N (any) are their own complement
const COMPLEMENT_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8; // Default: preserve character
        i += 1;
    }

    // DNA standard bases
    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'G' as usize] = b'C';
    table[b'C' as usize] = b'G';
    table[b'a' as usize] = b't';
    table[b't' as usize] = b'a';
    table[b'g' as usize] = b'c';
    table[b'c' as usize] = b'g';

    // RNA (U instead of T)
    table[b'U' as usize] = b'A';
    table[b'u' as usize] = b'a';

    // Two-base ambiguity codes
    table[b'R' as usize] = b'Y';
    table[b'Y' as usize] = b'R';
    table[b'K' as usize] = b'M';
    table[b'M' as usize] = b'K';
    table[b'r' as usize] = b'y';
    table[b'y' as usize] = b'r';
    table[b'k' as usize] = b'm';
    table[b'm' as usize] = b'k';

    // Three-base ambiguity codes
    table[b'B' as usize] = b'V';
    table[b'V' as usize] = b'B';
    table[b'D' as usize] = b'H';
    table[b'H' as usize] = b'D';
    table[b'b' as usize] = b'v';
    table[b'v' as usize] = b'b';
    table[b'd' as usize] = b'h';
    table[b'h' as usize] = b'd';

    // W, S and N map to themselves through the identity default

    table
};

/// Reverse complement a DNA/RNA sequence
///
/// Returns a new vector with the sequence reversed and complemented.
///
/// # Nucleotide Handling
///
/// - **Standard DNA**: A↔T, G↔C
/// - **RNA input**: Accepts U, but outputs T/A DNA-style (`AUGC` → `GCAT`)
/// - **Ambiguous IUPAC codes**: Complemented per IUPAC (R↔Y, K↔M, B↔V, D↔H)
/// - **Other characters**: Preserved as-is
///
/// # Examples
///
/// ```
/// use seqmetal::operations::reverse_complement;
///
/// assert_eq!(reverse_complement(b"ATGCN"), b"NGCAT");
///
/// // Involutive property: RC(RC(x)) = x
/// let original = b"ATGCATGC";
/// assert_eq!(reverse_complement(&reverse_complement(original)), original);
/// ```
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&base| COMPLEMENT_TABLE[base as usize])
        .collect()
}

/// Complement a sequence without reversing
///
/// # Examples
///
/// ```
/// use seqmetal::operations::complement;
///
/// let seq = b"ATGC";
/// let comp = complement(seq);
/// assert_eq!(comp, b"TACG");
///
/// // Involutive: C(C(x)) = x
/// assert_eq!(complement(&comp), b"ATGC");
/// ```
pub fn complement(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .map(|&base| COMPLEMENT_TABLE[base as usize])
        .collect()
}
