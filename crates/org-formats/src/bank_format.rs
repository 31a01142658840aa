//! Instrument bank decoding: the `wave100` wavetable and the drum samples.

use log::debug;
use org_ir::{InstrumentBank, DRUM_COUNT, WAVETABLE_COUNT, WAVETABLE_ENTRY_SIZE};

use crate::stream::ByteStream;
use crate::{BankError, FormatError};

/// Decode the melodic wavetable: 100 entries of 256 signed bytes, each
/// mapped to `v / 256`.
pub fn decode_wavetable(data: &[u8]) -> Result<Vec<[f64; WAVETABLE_ENTRY_SIZE]>, FormatError> {
    if data.len() != WAVETABLE_COUNT * WAVETABLE_ENTRY_SIZE {
        return Err(BankError::WavetableLength(data.len()).into());
    }

    let mut stream = ByteStream::new(data);
    let mut entries = Vec::with_capacity(WAVETABLE_COUNT);
    for _ in 0..WAVETABLE_COUNT {
        let block = stream.read_wavetable_block()?;
        entries.push(block.map(|v| v as f64 / 256.0));
    }
    Ok(entries)
}

/// Decode one drum sample: big-endian signed 16-bit PCM, each mapped to
/// `v / 32767`.
pub fn decode_drum(data: &[u8]) -> Result<Vec<f64>, FormatError> {
    if data.len() % 2 != 0 {
        return Err(BankError::OddDrumLength(data.len()).into());
    }
    if data.is_empty() {
        return Err(BankError::EmptyDrum.into());
    }

    let samples = ByteStream::new(data).read_remaining_as_i16_be()?;
    Ok(samples.into_iter().map(|v| v as f64 / 32767.0).collect())
}

/// Decode a complete bank from the wavetable bytes and the 12 drum samples.
pub fn load_bank<D: AsRef<[u8]>>(wavetable: &[u8], drums: &[D]) -> Result<InstrumentBank, FormatError> {
    if drums.len() != DRUM_COUNT {
        return Err(BankError::DrumCount(drums.len()).into());
    }

    let wavetable = decode_wavetable(wavetable)?;
    let drums = drums
        .iter()
        .map(|d| decode_drum(d.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "decoded instrument bank: {} waves, drum lengths {:?}",
        wavetable.len(),
        drums.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(InstrumentBank::new(wavetable, drums))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_wavetable_decodes_to_silence() {
        let waves = decode_wavetable(&[0u8; 25600]).unwrap();
        assert_eq!(waves.len(), 100);
        assert!(waves.iter().all(|w| w.len() == 256 && w.iter().all(|&v| v == 0.0)));
    }

    #[test]
    fn wavetable_normalization() {
        let mut data = vec![0u8; 25600];
        data[0] = 0x80; // -128
        data[1] = 0x40; // 64
        data[256] = 0xFF; // -1, first sample of entry 1
        let waves = decode_wavetable(&data).unwrap();
        assert_eq!(waves[0][0], -0.5);
        assert_eq!(waves[0][1], 0.25);
        assert_eq!(waves[1][0], -1.0 / 256.0);
    }

    #[test]
    fn wavetable_wrong_length_rejected() {
        assert_eq!(
            decode_wavetable(&[0u8; 25599]),
            Err(FormatError::InvalidInstrumentBank(BankError::WavetableLength(25599)))
        );
        assert!(decode_wavetable(&[]).is_err());
    }

    #[test]
    fn zero_drum_decodes_to_half_as_many_samples() {
        let drum = decode_drum(&[0u8; 10]).unwrap();
        assert_eq!(drum, vec![0.0; 5]);
    }

    #[test]
    fn drum_normalization_is_big_endian() {
        let drum = decode_drum(&[0x7F, 0xFF, 0x80, 0x01]).unwrap();
        assert_eq!(drum, vec![1.0, -1.0]);
    }

    #[test]
    fn drum_bad_lengths_rejected() {
        assert_eq!(
            decode_drum(&[0, 1, 2]),
            Err(FormatError::InvalidInstrumentBank(BankError::OddDrumLength(3)))
        );
        assert_eq!(
            decode_drum(&[]),
            Err(FormatError::InvalidInstrumentBank(BankError::EmptyDrum))
        );
    }

    #[test]
    fn load_bank_requires_twelve_drums() {
        let drums = vec![vec![0u8; 4]; 11];
        assert_eq!(
            load_bank(&[0u8; 25600], &drums),
            Err(FormatError::InvalidInstrumentBank(BankError::DrumCount(11)))
        );
    }

    #[test]
    fn load_bank_keeps_drum_order() {
        let drums: Vec<Vec<u8>> = (1..=12).map(|n| vec![0u8; n * 2]).collect();
        let bank = load_bank(&[0u8; 25600], &drums).unwrap();
        assert_eq!(bank.drums().len(), 12);
        assert_eq!(bank.drum_len(0), 1);
        assert_eq!(bank.drum_len(11), 12);
    }
}
