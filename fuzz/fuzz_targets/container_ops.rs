#![no_main]

use libfuzzer_sys::fuzz_target;
use samplebuf::{BufferContainer, ContainerConfig};

// Each 3-byte group is one operation, checked against a plain Vec model.
fuzz_target!(|data: &[u8]| {
    let config = ContainerConfig::default().with_max_len(512);
    let samples = BufferContainer::<u16, u8>::create_with_config(config).unwrap();
    let mut model: Vec<u8> = Vec::new();

    for op in data.chunks_exact(3) {
        let arg = u16::from_le_bytes([op[1], op[2]]) % 600;
        let mut guard = samples.write();

        match op[0] % 5 {
            0 => {
                guard.reserve(arg % 512);
                model.resize((arg % 512) as usize, 0);
            }
            1 => {
                let result = guard.try_reserve(arg);
                if (arg as usize) <= 512 {
                    assert!(result.is_ok());
                    model.resize(arg as usize, 0);
                } else {
                    assert!(result.is_err());
                }
            }
            2 => guard.squeeze(),
            3 => {
                if !model.is_empty() {
                    let i = arg as usize % model.len();
                    guard[i as u16] = op[1];
                    model[i] = op[1];
                }
            }
            _ => {
                assert_eq!(guard.get(arg).copied(), model.get(arg as usize).copied());
            }
        }

        // Verify: length and contents track the model after every operation
        assert_eq!(guard.len(), model.len());
        assert_eq!(guard.as_slice(), &model[..]);
        assert_eq!(guard.buffer_pointer_const(), guard.as_slice().as_ptr());
    }
});
