use bitstream_io::{BigEndian, BitRead, BitReader};
use speculate::speculate;

use bdpp_core::BitIterator;

speculate! {
    describe "BitIterator::next()" {
        // String: H           e
        // Hex   : 0x48        0x65
        // Binary: 0b01001000  0b01100101
        it "should return the 8 bits of 'H' most significant bit first" {
            let b = [0b0100_1000u8];
            let mut it = BitIterator::new(&b[..]);

            assert_eq!(it.next().unwrap(), 0, "1st bit not correct");
            assert_eq!(it.next().unwrap(), 1, "2nd bit not correct");
            assert_eq!(it.next().unwrap(), 0, "3rd bit not correct");
            assert_eq!(it.next().unwrap(), 0, "4th bit not correct");
            assert_eq!(it.next().unwrap(), 1, "5th bit not correct");
            assert_eq!(it.next().unwrap(), 0, "6th bit not correct");
            assert_eq!(it.next().unwrap(), 0, "7th bit not correct");
            assert_eq!(it.next().unwrap(), 0, "8th bit not correct");
            assert_eq!(it.next(), None, "it should end after the last bit of the last byte");
        }

        it "should continue into 'e' after skip(8)" {
            let b = [0b0100_1000, 0b0110_0101];
            let mut it = BitIterator::new(&b[..]).skip(8);

            assert_eq!(it.next().unwrap(), 0, "1st bit not correct");
            assert_eq!(it.next().unwrap(), 1, "2nd bit not correct");
            assert_eq!(it.next().unwrap(), 1, "3rd bit not correct");
            assert_eq!(it.next().unwrap(), 0, "4th bit not correct");
            assert_eq!(it.next().unwrap(), 0, "5th bit not correct");
            assert_eq!(it.next().unwrap(), 1, "6th bit not correct");
            assert_eq!(it.next().unwrap(), 0, "7th bit not correct");
            assert_eq!(it.next().unwrap(), 1, "8th bit not correct");
            assert_eq!(it.next(), None, "it should end after the last bit of the last byte");
        }

        it "should behave as the BitReader in BigEndian order" {
            let b = [0b0100_1000, 0b0110_0101];
            let mut it = BitIterator::new(&b[..]);
            let mut reader = BitReader::endian(
                &b[..],
                BigEndian
            );

            for i in 0..16 {
                assert_eq!(
                    it.next().unwrap(),
                    if reader.read_bit().unwrap() { 1 } else { 0 },
                    "{} bit not correct", i
                );
            }
        }
    }
}
