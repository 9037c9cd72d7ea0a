//! 虚拟机执行器
//!
//! 解释执行编译产物:一条扁平的操作码序列跑在定长的字节纸带上。
//! 数据指针在纸带上移动,分支通过控制栈回跳;每执行一条指令就做一次
//! 边界检查,指针越界立即中止运行。

use std::io::{ErrorKind, Read, Write};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::middle::bytecode::{Opcode, Program};

use super::errors::{VMError, VMResult};

/// 默认纸带长度(单元数)
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// Runtime tuning for the machine
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Number of cells on the tape
    pub tape_size: usize,
    /// Emit a trace event for every executed instruction
    pub trace_execution: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            trace_execution: false,
        }
    }
}

/// Execution status of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VMStatus {
    /// Ready to run a program
    Ready,
    /// A program is executing
    Running,
    /// The last run completed
    Finished,
    /// The last run aborted with an error
    Error,
}

/// The tape machine.
///
/// Reads bytes from `input` when the program asks for them and renders
/// cells to `output`. One machine can run several programs in a row;
/// the tape and pointers reset between runs, the I/O streams do not.
pub struct VM<R, W> {
    config: VMConfig,
    /// 纸带,运行前清零
    tape: Vec<u8>,
    /// 数据指针。用有符号数表示,越界的负值也能原样报告出来
    dp: isize,
    /// 程序计数器
    pc: usize,
    /// 控制栈,记录仍然打开的分支位置
    control_stack: SmallVec<[usize; 32]>,
    status: VMStatus,
    input: R,
    output: W,
}

impl<R: Read, W: Write> VM<R, W> {
    /// Create a machine with the default configuration
    #[inline]
    pub fn new(input: R, output: W) -> Self {
        Self::with_config(VMConfig::default(), input, output)
    }

    /// Create a machine with an explicit configuration
    pub fn with_config(config: VMConfig, input: R, output: W) -> Self {
        let tape = vec![0; config.tape_size];
        Self {
            config,
            tape,
            dp: 0,
            pc: 0,
            control_stack: SmallVec::new(),
            status: VMStatus::Ready,
            input,
            output,
        }
    }

    /// Current execution status
    #[inline]
    pub fn status(&self) -> VMStatus {
        self.status
    }

    /// The tape as it stands after the last run
    #[inline]
    pub fn tape(&self) -> &[u8] {
        &self.tape
    }

    /// Borrow the output sink, e.g. to inspect a buffered writer
    #[inline]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run a compiled program to completion.
    ///
    /// The tape, pointers and control stack reset first, so every call
    /// starts from a blank machine. Output is flushed once the run is
    /// over.
    pub fn run(&mut self, program: &Program) -> VMResult<()> {
        self.reset();
        self.status = VMStatus::Running;
        debug!(
            "Executing {} instructions (tape: {} cells)",
            program.len(),
            self.config.tape_size
        );

        let executed = self.execute(program);
        let flushed = self.output.flush();
        let result = match executed {
            Err(err) => Err(err),
            Ok(()) => flushed.map_err(VMError::OutputWrite),
        };

        self.status = match result {
            Ok(()) => VMStatus::Finished,
            Err(_) => VMStatus::Error,
        };
        result
    }

    /// 回到初始状态,纸带清零
    fn reset(&mut self) {
        self.tape.fill(0);
        self.dp = 0;
        self.pc = 0;
        self.control_stack.clear();
        self.status = VMStatus::Ready;
    }

    /// 取指-执行主循环
    fn execute(&mut self, program: &Program) -> VMResult<()> {
        while let Some(op) = program.get(self.pc) {
            if self.config.trace_execution {
                trace!(
                    "pc={:04} {} dp={} cell={}",
                    self.pc,
                    op,
                    self.dp,
                    self.cell().unwrap_or(0)
                );
            }
            self.step(program, op)?;
            // 每条指令之后立即检查两个指针,越界当场中止
            self.check_bounds(program.len())?;
            self.pc += 1;
        }
        Ok(())
    }

    /// 执行单条指令
    fn step(&mut self, program: &Program, op: Opcode) -> VMResult<()> {
        match op {
            Opcode::IncrementCell => {
                let cell = self.cell_mut()?;
                *cell = cell.wrapping_add(1);
            }
            Opcode::DecrementCell => {
                let cell = self.cell_mut()?;
                *cell = cell.wrapping_sub(1);
            }
            Opcode::MoveLeft => self.dp -= 1,
            Opcode::MoveRight => self.dp += 1,
            Opcode::ReadByte => self.read_cell()?,
            Opcode::WriteByte => self.write_cell()?,
            Opcode::LoopStart => {
                if self.cell()? == 0 {
                    self.skip_branch(program);
                } else {
                    self.control_stack.push(self.pc);
                }
            }
            Opcode::LoopEnd => {
                if self.cell()? != 0 {
                    // 回跳到仍然打开的分支;留在栈上,下一圈还要用
                    self.pc = *self
                        .control_stack
                        .last()
                        .ok_or(VMError::ControlStackUnderflow)?;
                } else {
                    self.control_stack
                        .pop()
                        .ok_or(VMError::ControlStackUnderflow)?;
                }
            }
        }
        Ok(())
    }

    /// 跳过一个关闭的分支。
    ///
    /// 从当前的分支开头向前扫描,嵌套分支按深度配对,pc 停在与之配对的
    /// 分支结尾上,主循环的自增再从它之后继续。整个分支体不执行,
    /// 控制栈也不动。
    fn skip_branch(&mut self, program: &Program) {
        let mut depth = 1usize;
        while depth > 0 {
            self.pc += 1;
            match program.get(self.pc) {
                Some(Opcode::LoopStart) => depth += 1,
                Some(Opcode::LoopEnd) => depth -= 1,
                Some(_) => {}
                // 扫到程序末尾也没配对上,交给边界检查报告
                None => return,
            }
        }
    }

    /// 边界检查:两个指针都必须落在各自的范围内
    #[inline]
    fn check_bounds(&self, program_len: usize) -> VMResult<()> {
        if self.pc >= program_len {
            return Err(VMError::ProgramCounterOutOfBounds(self.pc));
        }
        if self.dp < 0 || self.dp as usize >= self.tape.len() {
            return Err(VMError::DataPointerOutOfBounds(self.dp));
        }
        Ok(())
    }

    /// 当前单元的值
    #[inline]
    fn cell(&self) -> VMResult<u8> {
        self.tape
            .get(self.dp as usize)
            .copied()
            .ok_or(VMError::DataPointerOutOfBounds(self.dp))
    }

    /// 当前单元的可变引用
    #[inline]
    fn cell_mut(&mut self) -> VMResult<&mut u8> {
        let dp = self.dp;
        self.tape
            .get_mut(dp as usize)
            .ok_or(VMError::DataPointerOutOfBounds(dp))
    }

    /// 从输入读一个字节写入当前单元。
    ///
    /// 输入耗尽时单元保持原值,指令相当于空操作。
    fn read_cell(&mut self) -> VMResult<()> {
        let mut byte = [0u8; 1];
        loop {
            return match self.input.read(&mut byte) {
                Ok(0) => Ok(()),
                Ok(_) => {
                    *self.cell_mut()? = byte[0];
                    Ok(())
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => Err(VMError::InputRead(err)),
            };
        }
    }

    /// 把当前单元按字符渲染到输出。
    ///
    /// 单元值当作码点处理,0x80 以上的值会编码成多字节 UTF-8。
    fn write_cell(&mut self) -> VMResult<()> {
        let ch = char::from(self.cell()?);
        let mut buf = [0u8; 4];
        let encoded = ch.encode_utf8(&mut buf);
        self.output
            .write_all(encoded.as_bytes())
            .map_err(VMError::OutputWrite)
    }
}
