use sha3::{Sha3_256, Digest};

pub fn get_sha3_256_hash(data: &str) -> String {
   let mut hasher = Sha3_256::default();
   hasher.update(data);
   format!("{:X}", hasher.finalize())
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_hash_is_deterministic() {
      assert_eq!(get_sha3_256_hash("hunter2"), get_sha3_256_hash("hunter2"));
      assert_ne!(get_sha3_256_hash("hunter2"), get_sha3_256_hash("hunter3"));
   }
}
