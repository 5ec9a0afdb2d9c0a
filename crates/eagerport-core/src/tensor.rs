use std::fmt;

use anyhow::{bail, ensure, Result};
use bytes::Bytes;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Cuda { device_id: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DType {
    F32,
    F16,
    I64,
    I32,
    U8,
}

impl DType {
    pub fn byte_size(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F16 => 2,
            DType::I64 => 8,
            DType::I32 => 4,
            DType::U8 => 1,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F32 => "f32",
            DType::F16 => "f16",
            DType::I64 => "i64",
            DType::I32 => "i32",
            DType::U8 => "u8",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape(pub SmallVec<[usize; 6]>);

impl Shape {
    pub fn from_slice(d: &[usize]) -> Self {
        Self(d.iter().copied().collect())
    }
    pub fn rank(&self) -> usize {
        self.0.len()
    }
    pub fn numel(&self) -> usize {
        self.0.iter().product::<usize>()
    }
    pub fn checked_numel(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }
    /// Buffer size for `dtype`, or `None` on overflow.
    pub fn byte_len(&self, dtype: DType) -> Option<usize> {
        self.checked_numel()?.checked_mul(dtype.byte_size())
    }
    pub fn dim(&self, axis: usize) -> Option<usize> {
        self.0.get(axis).copied()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{d}")?;
        }
        f.write_str("]")
    }
}

/// Example value handed to a tracer. CPU only; the device is carried as a
/// placement hint for the export pipeline.
#[derive(Clone, Debug)]
pub struct Tensor {
    pub dtype: DType,
    pub shape: Shape,
    pub device: Device,
    pub bytes: Bytes,
}

impl Tensor {
    /// Checks that `bytes` holds exactly one `dtype` element per shape element.
    pub fn new(dtype: DType, shape: Shape, bytes: Bytes) -> Result<Self> {
        let Some(expected) = shape.byte_len(dtype) else {
            bail!("shape {shape} of {dtype} overflows the addressable size");
        };
        ensure!(
            bytes.len() == expected,
            "{dtype} tensor of shape {shape} needs {expected} bytes, got {}",
            bytes.len()
        );
        Ok(Self::from_cpu_bytes(dtype, shape, bytes))
    }

    /// No size check; see [`Tensor::new`].
    pub fn from_cpu_bytes(dtype: DType, shape: Shape, bytes: Bytes) -> Self {
        Self {
            dtype,
            shape,
            device: Device::Cpu,
            bytes,
        }
    }

    /// # Panics
    ///
    /// If the buffer size overflows `usize`.
    pub fn zeros(dtype: DType, dims: &[usize]) -> Self {
        let shape = Shape::from_slice(dims);
        let Some(len) = shape.byte_len(dtype) else {
            panic!("shape {shape} of {dtype} overflows the addressable size");
        };
        let bytes = Bytes::from(vec![0u8; len]);
        Self::from_cpu_bytes(dtype, shape, bytes)
    }

    pub fn from_f32(dims: &[usize], data: &[f32]) -> Result<Self> {
        let shape = Shape::from_slice(dims);
        let Some(numel) = shape.checked_numel() else {
            bail!("shape {shape} overflows the addressable size");
        };
        ensure!(
            data.len() == numel,
            "f32 data has {} elements, shape {shape} needs {numel}",
            data.len()
        );
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        Ok(Self::from_cpu_bytes(DType::F32, shape, Bytes::from(bytes)))
    }

    pub fn on_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}
