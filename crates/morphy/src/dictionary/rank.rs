// Relative paradigm frequencies used to order dictionary matches.

use std::io::{self, Read, Write};

use hashbrown::HashMap;
use morphy_dawg::{ByteReader, ByteWriter, FormatError};

/// Paradigm id to relative frequency. Paradigms without an entry rank 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordRankTable {
    ranks: HashMap<u16, u32>,
}

impl WordRankTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (u16, u32)>) -> Self {
        Self {
            ranks: pairs.into_iter().collect(),
        }
    }

    /// Decode the `RANK` section body. Paradigm ids must be below
    /// `paradigm_count`.
    pub fn read<R: Read>(
        reader: &mut ByteReader<R>,
        paradigm_count: usize,
    ) -> Result<Self, FormatError> {
        let section = reader.section();
        let count = reader.read_len()?;
        let mut ranks = HashMap::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            let paradigm = reader.read_id()?;
            let frequency = reader.read_u32()?;
            if usize::from(paradigm) >= paradigm_count {
                return Err(FormatError::inconsistent(
                    section,
                    format!("rank for unknown paradigm {paradigm}"),
                ));
            }
            ranks.insert(paradigm, frequency);
        }
        log::debug!("{section}: {} ranked paradigms", ranks.len());
        Ok(Self { ranks })
    }

    /// Entries are written in paradigm order so output is deterministic.
    pub fn write_to<W: Write>(&self, writer: &mut ByteWriter<W>) -> io::Result<()> {
        let mut entries: Vec<(u16, u32)> = self.ranks.iter().map(|(&p, &f)| (p, f)).collect();
        entries.sort_unstable();
        writer.write_len(entries.len())?;
        for (paradigm, frequency) in entries {
            writer.write_varint(u64::from(paradigm))?;
            writer.write_u32(frequency)?;
        }
        Ok(())
    }

    pub fn frequency(&self, paradigm: u16) -> u32 {
        self.ranks.get(&paradigm).copied().unwrap_or(0)
    }

    /// Scoring weight: `frequency + 1`, so unranked paradigms still count.
    pub fn weight(&self, paradigm: u16) -> f32 {
        self.frequency(paradigm) as f32 + 1.0
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphy_dawg::Endian;

    #[test]
    fn weights() {
        let t = WordRankTable::from_pairs([(0, 10), (2, 0)]);
        assert_eq!(t.frequency(0), 10);
        assert_eq!(t.weight(0), 11.0);
        assert_eq!(t.weight(1), 1.0);
        assert_eq!(t.weight(2), 1.0);
    }

    #[test]
    fn roundtrip_and_bounds() {
        let t = WordRankTable::from_pairs([(3, 70_000), (1, 5)]);
        let mut w = ByteWriter::new(Vec::new(), Endian::Little);
        t.write_to(&mut w).unwrap();
        let bytes = w.into_inner();

        let mut r = ByteReader::new(&bytes[..]);
        r.set_endian(Endian::Little);
        assert_eq!(WordRankTable::read(&mut r, 4).unwrap(), t);

        let mut r = ByteReader::new(&bytes[..]);
        r.set_endian(Endian::Little);
        r.set_section("ranks");
        assert!(matches!(
            WordRankTable::read(&mut r, 3),
            Err(FormatError::Inconsistent { section: "ranks", .. })
        ));
    }
}
